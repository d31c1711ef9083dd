//! Editor errors.

use transdesk_common_core::Error;

/// Result of an editor operation.
pub type EditResult<T> = std::result::Result<T, EditorError>;

/// Rejected editor operations. State is unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    #[error("Key is required")]
    EmptyKey,

    #[error("Key already exists!")]
    DuplicateKey(String),

    #[error("Locale code is required")]
    EmptyLocale,

    #[error("Locale already exists!")]
    DuplicateLocale(String),

    #[error("Cannot remove the last locale!")]
    LastLocale,

    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    #[error("unknown key: {0}")]
    UnknownKey(String),

    #[error("no key selected")]
    NoSelection,

    #[error("finish or cancel the open edit first")]
    Busy,

    #[error("no edit in progress")]
    NotEditing,

    #[error("no add in progress")]
    NotAdding,

    #[error("a confirmation is already pending")]
    AwaitingConfirmation,

    #[error("nothing to confirm")]
    NothingPending,

    #[error("the project has no locales")]
    NoLocales,
}

impl EditorError {
    /// Conflicts with existing state, as opposed to bad input.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicateKey(_) | Self::DuplicateLocale(_) | Self::LastLocale
        )
    }
}

impl From<EditorError> for Error {
    fn from(e: EditorError) -> Self {
        let message = e.to_string();
        match e {
            EditorError::EmptyKey | EditorError::UnknownKey(_) => Error::validation("key", message),
            EditorError::EmptyLocale | EditorError::UnknownLocale(_) => {
                Error::validation("locale", message)
            }
            e if e.is_conflict() => Error::conflict(message),
            _ => Error::invalid(message),
        }
    }
}
