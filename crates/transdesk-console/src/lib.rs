//! Transdesk console.
//!
//! The console shell around the query cache and the translation editor:
//! the route table, route loaders, page controllers and the project forms,
//! plus the `transdesk` command-line front end that drives them.

pub mod app;
pub mod cli;
pub mod commands;
pub mod error;
pub mod navigation;
pub mod output;
pub mod pages;
pub mod router;
pub mod routes;

pub use app::Console;
pub use error::CliError;
pub use router::{Navigation, NavigationKind, Router};
pub use routes::Route;
