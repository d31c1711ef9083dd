//! Command implementations.

mod locales;
mod open;
mod projects;
mod translations;

pub use locales::LocalesCommand;
pub use open::OpenCommand;
pub use projects::ProjectsCommand;
pub use translations::TranslationsCommand;
