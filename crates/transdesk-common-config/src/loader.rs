//! Configuration file loading and parsing.

use crate::env::{vars, Environment};
use crate::types::ConsoleConfig;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

const CONFIG_DIR: &str = ".transdesk";
const CONFIG_FILE: &str = "config.yaml";

fn env_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").expect("env var pattern is valid")
    })
}

/// Configuration loader.
pub struct ConfigLoader {
    config_path: PathBuf,
    explicit: bool,
}

impl ConfigLoader {
    /// Create a loader for `.transdesk/config.yaml` under the given directory.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            config_path: project_dir.as_ref().join(CONFIG_DIR).join(CONFIG_FILE),
            explicit: false,
        }
    }

    /// Create a loader for an explicit file. A missing file is an error.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            explicit: true,
        }
    }

    /// Path the loader reads.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration, apply the environment override and validate.
    pub fn load(&self) -> Result<ConsoleConfig, ConfigError> {
        let mut config = self.load_file()?;

        if let Some(base_url) = Environment::backend_base_url() {
            tracing::debug!(var = vars::APP_BACKEND_BASE_URL, "base URL taken from environment");
            config.backend.base_url = Some(base_url);
        }

        self.validate(&config)?;
        Ok(config)
    }

    fn load_file(&self) -> Result<ConsoleConfig, ConfigError> {
        if !self.config_path.exists() {
            if self.explicit {
                return Err(ConfigError::NotFound {
                    path: self.config_path.clone(),
                });
            }
            return Ok(ConsoleConfig::default());
        }

        let contents = std::fs::read_to_string(&self.config_path)?;
        let expanded = self.expand_env_vars(&contents)?;

        serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })
    }

    /// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
    fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();

        for cap in env_pattern().captures_iter(content) {
            let full_match = &cap[0];
            let var_name = &cap[1];
            let default = cap.get(2).map(|m| m.as_str());

            let value = match std::env::var(var_name) {
                Ok(v) => v,
                Err(_) => match default {
                    Some(d) => d.to_string(),
                    None => {
                        return Err(ConfigError::EnvVarNotFound {
                            var: var_name.to_string(),
                        })
                    }
                },
            };

            result = result.replace(full_match, &value);
        }

        Ok(result)
    }

    /// Validate configuration values.
    fn validate(&self, config: &ConsoleConfig) -> Result<(), ConfigError> {
        if config.backend.connect_timeout_secs == 0 {
            return Err(ConfigError::ValidationError {
                message: "backend.connect_timeout_secs must be greater than 0".to_string(),
            });
        }

        if config.backend.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError {
                message: "backend.request_timeout_secs must be greater than 0".to_string(),
            });
        }

        if let Some(base_url) = &config.backend.base_url {
            let parsed = url::Url::parse(base_url).map_err(|e| ConfigError::ValidationError {
                message: format!("backend.base_url is not a valid URL: {}", e),
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::ValidationError {
                    message: format!(
                        "backend.base_url must use http or https, got {}",
                        parsed.scheme()
                    ),
                });
            }
        }

        Ok(())
    }

    /// Save configuration to the loader's path.
    pub fn save(&self, config: &ConsoleConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(config).map_err(|e| ConfigError::ParseError {
            line: None,
            message: e.to_string(),
        })?;

        std::fs::write(&self.config_path, yaml)?;
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_config(dir: &Path, content: &str) {
        let config_dir = dir.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join(CONFIG_FILE), content).unwrap();
    }

    #[test]
    fn test_load_defaults_when_no_file() {
        let dir = tempdir().unwrap();
        let config = ConfigLoader::new(dir.path()).load_file().unwrap();
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::from_file(dir.path().join("nope.yaml"));
        assert!(matches!(loader.load(), Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_load_config_from_yaml_file() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
backend:
  base_url: http://localhost:8080
  request_timeout_secs: 12
  accept_invalid_certs: true
cache:
  enabled: false
"#,
        );

        let config = ConfigLoader::new(dir.path()).load_file().unwrap();
        assert_eq!(config.backend.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(config.backend.request_timeout_secs, 12);
        assert!(config.backend.accept_invalid_certs);
        assert!(!config.cache.enabled);
        assert_eq!(config.backend.connect_timeout_secs, 10);
    }

    #[test]
    fn test_env_var_expansion() {
        std::env::set_var("TRANSDESK_TEST_EXPAND", "test_value");
        let loader = ConfigLoader::new(".");
        let result = loader.expand_env_vars("key: ${TRANSDESK_TEST_EXPAND}").unwrap();
        assert_eq!(result, "key: test_value");
        std::env::remove_var("TRANSDESK_TEST_EXPAND");
    }

    #[test]
    fn test_env_var_default() {
        let loader = ConfigLoader::new(".");
        let result = loader
            .expand_env_vars("key: ${TRANSDESK_TEST_NONEXISTENT:-default}")
            .unwrap();
        assert_eq!(result, "key: default");
    }

    #[test]
    fn test_env_var_missing_error() {
        let loader = ConfigLoader::new(".");
        match loader.expand_env_vars("key: ${TRANSDESK_TEST_MISSING}") {
            Err(ConfigError::EnvVarNotFound { var }) => assert_eq!(var, "TRANSDESK_TEST_MISSING"),
            other => panic!("Expected EnvVarNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let loader = ConfigLoader::new(".");
        let mut config = ConsoleConfig::default();
        config.backend.request_timeout_secs = 0;
        assert!(matches!(
            loader.validate(&config),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let loader = ConfigLoader::new(".");
        let mut config = ConsoleConfig::default();
        config.backend.base_url = Some("not a url".to_string());
        assert!(loader.validate(&config).is_err());

        config.backend.base_url = Some("ftp://files.example.com".to_string());
        assert!(loader.validate(&config).is_err());

        config.backend.base_url = Some("https://api.example.com/v1".to_string());
        assert!(loader.validate(&config).is_ok());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path());
        let mut config = ConsoleConfig::default();
        config.backend.base_url = Some("https://api.example.com".to_string());
        loader.save(&config).unwrap();

        let loaded = loader.load_file().unwrap();
        assert_eq!(loaded, config);
    }
}
