//! Configuration types for Transdesk.
//!
//! Configuration comes from `.transdesk/config.yaml` (optional) and the
//! environment. The backend base URL is normally supplied through
//! `APP_BACKEND_BASE_URL`, which always wins over the file.

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;
