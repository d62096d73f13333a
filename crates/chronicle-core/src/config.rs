//! Configuration loading and typed config structures for the Chronicle
//! service.
//!
//! The canonical configuration lives in `chronicle-config.yaml` at the
//! project root. Every field has a default, so an empty or partial file is
//! valid. Environment variables override the file for deployment-specific
//! values:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `CHRONICLE_DATA_PATH` | `data.path` |
//! | `CHRONICLE_HOST` | `server.host` |
//! | `CHRONICLE_PORT` | `server.port` |
//! | `CHRONICLE_LOG_LEVEL` | `logging.level` |

use std::path::{Path, PathBuf};

use serde::Deserialize;
use validator::Validate;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override could not be parsed.
    #[error("invalid environment override {name}: {message}")]
    Env {
        /// Variable name.
        name: String,
        /// What was wrong with it.
        message: String,
    },

    /// The configuration parsed but holds unusable values.
    #[error("invalid configuration: {source}")]
    Invalid {
        /// Field-level validation failures.
        #[from]
        source: validator::ValidationErrors,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct ChronicleConfig {
    /// HTTP listener settings.
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerSettings,

    /// Dataset location.
    #[serde(default)]
    #[validate(nested)]
    pub data: DataConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ChronicleConfig {
    /// Load configuration from a YAML file, apply environment overrides,
    /// and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, [`ConfigError::Env`]
    /// for a malformed override, or [`ConfigError::Invalid`] if a value is
    /// out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, apply environment overrides,
    /// and validate the result.
    ///
    /// # Errors
    ///
    /// See [`from_file`](Self::from_file).
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from a variable lookup.
    ///
    /// Production code passes the process environment; tests pass a map.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if `CHRONICLE_PORT` is not a port
    /// number.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("CHRONICLE_DATA_PATH") {
            self.data.path = PathBuf::from(val);
        }
        if let Some(val) = lookup("CHRONICLE_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("CHRONICLE_PORT") {
            self.server.port = val.trim().parse().map_err(|e| ConfigError::Env {
                name: "CHRONICLE_PORT".to_owned(),
                message: format!("{val:?}: {e}"),
            })?;
        }
        if let Some(val) = lookup("CHRONICLE_LOG_LEVEL") {
            self.logging.level = val;
        }
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct ServerSettings {
    /// Address to bind (e.g. `0.0.0.0`).
    #[serde(default = "default_host")]
    #[validate(length(min = 1))]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    #[validate(range(min = 1))]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Dataset location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct DataConfig {
    /// Path to the events JSON file.
    #[serde(default = "default_data_path")]
    #[validate(custom(function = "validate_data_path"))]
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn validate_data_path(path: &Path) -> Result<(), validator::ValidationError> {
    if path.as_os_str().is_empty() {
        return Err(validator::ValidationError::new("empty_path"));
    }
    Ok(())
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    5000
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/events.json")
}

fn default_log_level() -> String {
    "info".to_owned()
}
