//! Error types for Transdesk.
//!
//! The error is `Clone` so that a single coalesced fetch can hand the same
//! failure to every waiter. Lower layers keep their own error enums and
//! convert into this one at the crate boundary.

use serde::Serialize;
use thiserror::Error;

/// The main error type for Transdesk operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A client-side precondition failed. Never reaches the network.
    #[error("{message}")]
    Validation {
        /// Offending field, when one can be named.
        field: Option<String>,
        /// Human readable message.
        message: String,
    },

    /// Connection, DNS, TLS or timeout failure, or no usable base URL.
    #[error("transport error: {message}")]
    Transport {
        /// Underlying failure description.
        message: String,
    },

    /// The backend answered with a non-2xx status.
    #[error("server error {status}: {body}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// A 2xx body did not match the expected shape.
    #[error("failed to decode response: {message}")]
    Decode {
        /// Parser message.
        message: String,
    },

    /// The requested change conflicts with current state.
    #[error("{message}")]
    Conflict {
        /// Human readable message.
        message: String,
    },

    /// The scope that issued the call ended before it completed.
    #[error("operation cancelled")]
    Cancelled,

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config {
        /// Human readable message.
        message: String,
    },
}

/// Coarse classification of an [`Error`], used for exit codes and JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Transport,
    Server,
    Decode,
    Conflict,
    Cancelled,
    Config,
}

impl Error {
    /// Create a validation error for a named field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Create a validation error not tied to a field.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a server error.
    pub fn server(status: u16, body: impl Into<String>) -> Self {
        Self::Server {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Server { .. } => ErrorKind::Server,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Config { .. } => ErrorKind::Config,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// HTTP status, for server errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias using Transdesk's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Return early with a validation error if the condition is false.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:expr) => {
        if !$cond {
            return Err($crate::error::Error::invalid($msg));
        }
    };
    ($cond:expr, $field:expr, $msg:expr) => {
        if !$cond {
            return Err($crate::error::Error::validation($field, $msg));
        }
    };
}
