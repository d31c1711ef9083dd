//! Translation editing model.
//!
//! [`TranslationEditor`] owns the keys, the locale set and every value for
//! one editing session. It performs no I/O: the console loads locales
//! through the query layer and hands them in, and translations leave the
//! editor only as exported usecase requests.
//!
//! Every entry always carries exactly the codes of the current locale set.

pub mod editor;
pub mod error;
pub mod locale;

pub use editor::{EditorSummary, Mode, PendingConfirmation, TranslationEditor, ValueMap};
pub use error::{EditResult, EditorError};
pub use locale::{locale_name, normalize_locale, LocaleSet};
