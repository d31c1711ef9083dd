//! Typed REST clients for the Transdesk backend.
//!
//! [`ProjectApi`] and [`LocaleApi`] issue exactly one HTTP call per
//! operation and hand back the parsed body or the failure. They do not
//! retry, cache or swallow errors; that belongs to `transdesk-query`.
//!
//! Both clients sit behind the [`ProjectResource`] and [`LocaleResource`]
//! traits so the query layer can be driven by any backend.

pub mod locale;
pub mod model;
pub mod project;

pub use locale::{LocaleApi, LocaleResource};
pub use model::{
    CreateNewTranslation, Locale, LocalePayload, Project, ProjectPayload, TranslationValue,
};
pub use project::{ProjectApi, ProjectResource};
