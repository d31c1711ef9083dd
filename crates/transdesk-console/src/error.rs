//! CLI error handling.

use std::process::ExitCode;

use thiserror::Error;
use transdesk_common_config::ConfigError;
use transdesk_common_core::Error;
use transdesk_editor::EditorError;

/// Application exit codes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
    ConfigError = 2,
    NetworkError = 4,
    ValidationError = 5,
    Interrupted = 130,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        hint: Option<String>,
    },

    #[error("{message}")]
    Network { message: String },

    #[error("{message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{message}")]
    User {
        message: String,
        hint: Option<String>,
    },

    #[error("interrupted")]
    Interrupted,

    #[error("{0}")]
    Other(String),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit(&self) -> Exit {
        match self {
            Self::Config { .. } => Exit::ConfigError,
            Self::Network { .. } => Exit::NetworkError,
            Self::Validation { .. } => Exit::ValidationError,
            Self::Interrupted => Exit::Interrupted,
            Self::Server { .. } | Self::User { .. } | Self::Other(_) => Exit::GeneralError,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit().into()
    }

    /// Get hint for this error if available
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { hint, .. } | Self::User { hint, .. } => hint.as_deref(),
            Self::Network { .. } => Some("Check APP_BACKEND_BASE_URL and that the backend is reachable"),
            _ => None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a user error (user did something wrong)
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
            hint: None,
        }
    }

    /// Create a user error with hint
    pub fn user_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}

impl From<Error> for CliError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation { field, message } => Self::Validation { message, field },
            Error::Conflict { message } => Self::Validation {
                message,
                field: None,
            },
            Error::Transport { .. } | Error::Decode { .. } => Self::Network {
                message: err.to_string(),
            },
            Error::Server { status, ref body } => Self::Server {
                status,
                message: if body.trim().is_empty() {
                    format!("server responded with status {status}")
                } else {
                    format!("server responded with status {status}: {}", body.trim())
                },
            },
            Error::Cancelled => Self::Interrupted,
            Error::Config { message } => Self::Config {
                message,
                hint: None,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config {
            message: format!("Configuration error: {err}"),
            hint: Some("Check .transdesk/config.yaml or TRANSDESK_CONFIG_PATH".to_string()),
        }
    }
}

impl From<EditorError> for CliError {
    fn from(err: EditorError) -> Self {
        Error::from(err).into()
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(format!("failed to encode output: {err}"))
    }
}
