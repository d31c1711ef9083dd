//! Route-level placeholders.

use serde::Serialize;
use transdesk_common_core::Error;

pub const UNKNOWN_ERROR: &str = "An unknown error occurred";

/// Message for a failure shown to the user, or `fallback` when the error
/// carries nothing readable.
pub fn user_message(err: &Error, fallback: &str) -> String {
    match err {
        Error::Server { body, .. } if body.trim().is_empty() => fallback.to_string(),
        Error::Server { body, .. } => body.trim().to_string(),
        other => {
            let message = other.to_string();
            if message.trim().is_empty() {
                fallback.to_string()
            } else {
                message
            }
        }
    }
}

/// Generic error page for a failed route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorFallback {
    pub message: String,
}

impl ErrorFallback {
    pub fn from_error(err: Option<&Error>) -> Self {
        Self {
            message: err.map_or_else(|| UNKNOWN_ERROR.to_string(), |e| user_message(e, UNKNOWN_ERROR)),
        }
    }

    pub fn render(&self) -> String {
        format!("Something went wrong\n{}\n", self.message)
    }
}

/// Routing miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFoundPage {
    pub path: String,
}

impl NotFoundPage {
    pub fn render(&self) -> String {
        format!("Page not found: {}\nGo back home: /\n", self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_without_error() {
        assert_eq!(ErrorFallback::from_error(None).message, UNKNOWN_ERROR);
    }

    #[test]
    fn test_user_message() {
        assert_eq!(user_message(&Error::server(500, ""), "Try again"), "Try again");
        assert_eq!(user_message(&Error::server(500, "db down\n"), "Try again"), "db down");
        assert_eq!(
            user_message(&Error::invalid("Project name is required"), "Try again"),
            "Project name is required"
        );
        assert_eq!(user_message(&Error::invalid(""), "Try again"), "Try again");
    }

    #[test]
    fn test_not_found_links_home() {
        let page = NotFoundPage {
            path: "/nope".to_string(),
        };
        assert!(page.render().contains("Go back home: /"));
    }
}
