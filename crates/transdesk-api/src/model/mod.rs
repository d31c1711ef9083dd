//! Wire models.
//!
//! Field names follow the backend's camelCase JSON. Server-assigned ids are
//! optional and omitted from request bodies.

mod locale;
mod project;
mod usecase;

pub use locale::{Locale, LocalePayload};
pub use project::{Project, ProjectPayload};
pub use usecase::{CreateNewTranslation, TranslationValue};
