//! Environment variable handling.

use std::env;
use std::path::Path;
use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("required environment variable not set: {var}")]
    NotSet { var: String },

    #[error("invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("failed to load {file}: {message}")]
    File { file: String, message: String },
}

/// Environment variable names.
pub mod vars {
    // Backend
    pub const APP_BACKEND_BASE_URL: &str = "APP_BACKEND_BASE_URL";

    // Configuration
    pub const TRANSDESK_CONFIG_PATH: &str = "TRANSDESK_CONFIG_PATH";
    pub const TRANSDESK_LOG_LEVEL: &str = "TRANSDESK_LOG_LEVEL";

    // Development
    pub const APP_ENV: &str = "APP_ENV";
    pub const RUST_LOG: &str = "RUST_LOG";
}

/// Environment files loaded at startup.
///
/// Loading happens before logging is configured, so the outcome is kept and
/// reported afterwards with [`Environment::log`].
#[derive(Debug, Default)]
pub struct Environment {
    loaded: Vec<String>,
    errors: Vec<EnvError>,
}

impl Environment {
    /// Load `.env`, `.env.local` and `.env.{APP_ENV}` into the process.
    ///
    /// Variables already present are never overwritten, so the first file
    /// that defines a variable wins over later ones.
    pub fn init() -> Self {
        Self::init_in(Path::new("."))
    }

    /// Load the environment files found in `dir`.
    pub fn init_in(dir: &Path) -> Self {
        let mut environment = Self::default();
        for file in [".env", ".env.local"] {
            environment.load(dir, file.to_string());
        }
        if let Ok(app_env) = env::var(vars::APP_ENV) {
            environment.load(dir, format!(".env.{app_env}"));
        }
        environment
    }

    fn load(&mut self, dir: &Path, file: String) {
        match dotenvy::from_path(dir.join(&file)) {
            Ok(()) => self.loaded.push(file),
            Err(e) if e.not_found() => {}
            Err(e) => self.errors.push(EnvError::File {
                file,
                message: e.to_string(),
            }),
        }
    }

    /// Files that were found and applied, in load order.
    pub fn loaded(&self) -> &[String] {
        &self.loaded
    }

    /// Files that exist but could not be read or parsed.
    pub fn errors(&self) -> &[EnvError] {
        &self.errors
    }

    /// Report the load outcome through `tracing`.
    pub fn log(&self) {
        for file in &self.loaded {
            tracing::debug!(file = %file, "loaded environment file");
        }
        for err in &self.errors {
            tracing::warn!(error = %err, "environment file skipped");
        }
    }

    /// Get a required string variable.
    pub fn require(var: &str) -> Result<String, EnvError> {
        env::var(var).map_err(|_| EnvError::NotSet {
            var: var.to_string(),
        })
    }

    /// Get an optional, non-blank string variable.
    pub fn get(var: &str) -> Option<String> {
        env::var(var).ok().filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    pub fn get_or(var: &str, default: &str) -> String {
        Self::get(var).unwrap_or_else(|| default.to_string())
    }

    /// Get a boolean variable.
    pub fn get_bool(var: &str) -> Option<bool> {
        env::var(var)
            .ok()
            .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
    }

    /// Get an integer variable.
    pub fn get_int<T: std::str::FromStr>(var: &str) -> Result<Option<T>, EnvError> {
        match env::var(var) {
            Ok(v) => v.trim().parse().map(Some).map_err(|_| EnvError::InvalidValue {
                var: var.to_string(),
                message: "expected integer".to_string(),
            }),
            Err(_) => Ok(None),
        }
    }

    /// The backend base URL, if configured.
    pub fn backend_base_url() -> Option<String> {
        Self::get(vars::APP_BACKEND_BASE_URL)
    }

    /// Check if running in production mode.
    pub fn is_production() -> bool {
        env::var(vars::APP_ENV)
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_in_reports_loaded_and_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "TRANSDESK_TEST_DOTENV=from-file\n").unwrap();
        std::fs::write(dir.path().join(".env.local"), "no equals sign here\n").unwrap();

        let environment = Environment::init_in(dir.path());
        assert_eq!(environment.loaded(), [".env"]);
        assert_eq!(environment.errors().len(), 1);
        assert!(matches!(&environment.errors()[0], EnvError::File { file, .. } if file == ".env.local"));
        assert_eq!(Environment::get("TRANSDESK_TEST_DOTENV").as_deref(), Some("from-file"));
        env::remove_var("TRANSDESK_TEST_DOTENV");
    }

    #[test]
    fn test_init_in_empty_dir_is_quiet() {
        let dir = tempfile::tempdir().unwrap();
        let environment = Environment::init_in(dir.path());
        assert!(environment.loaded().is_empty());
        assert!(environment.errors().is_empty());
    }

    #[test]
    fn test_require_missing() {
        let err = Environment::require("TRANSDESK_TEST_DEFINITELY_UNSET").unwrap_err();
        assert!(matches!(err, EnvError::NotSet { ref var } if var == "TRANSDESK_TEST_DEFINITELY_UNSET"));
    }

    #[test]
    fn test_blank_value_is_absent() {
        env::set_var("TRANSDESK_TEST_BLANK", "   ");
        assert!(Environment::get("TRANSDESK_TEST_BLANK").is_none());
        assert_eq!(Environment::get_or("TRANSDESK_TEST_BLANK", "x"), "x");
        env::remove_var("TRANSDESK_TEST_BLANK");
    }

    #[test]
    fn test_get_bool() {
        env::set_var("TRANSDESK_TEST_BOOL", "YES");
        assert_eq!(Environment::get_bool("TRANSDESK_TEST_BOOL"), Some(true));
        env::set_var("TRANSDESK_TEST_BOOL", "off");
        assert_eq!(Environment::get_bool("TRANSDESK_TEST_BOOL"), Some(false));
        env::remove_var("TRANSDESK_TEST_BOOL");
        assert_eq!(Environment::get_bool("TRANSDESK_TEST_BOOL"), None);
    }

    #[test]
    fn test_get_int() {
        env::set_var("TRANSDESK_TEST_INT", "42");
        assert_eq!(Environment::get_int::<u64>("TRANSDESK_TEST_INT").unwrap(), Some(42));
        env::set_var("TRANSDESK_TEST_INT", "forty-two");
        assert!(Environment::get_int::<u64>("TRANSDESK_TEST_INT").is_err());
        env::remove_var("TRANSDESK_TEST_INT");
    }
}
