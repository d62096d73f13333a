//! Process bootstrapping: configuration, logging, and catalog loading.
//!
//! Everything here runs once before the server accepts connections. Any
//! failure is fatal: the process must not serve without a valid catalog.

use std::path::Path;
use std::sync::Arc;

use chronicle_core::config::{ChronicleConfig, ConfigError, LogFormat, LoggingConfig};
use chronicle_core::{Catalog, CatalogError};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::server::ServerError;
use crate::state::AppState;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "chronicle-config.yaml";

/// Top-level startup error.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The dataset is missing or malformed.
    #[error("catalog error: {source}")]
    Catalog {
        /// The underlying catalog error.
        #[from]
        source: CatalogError,
    },

    /// The HTTP server failed to start or crashed.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: ServerError,
    },
}

/// Load configuration from `path`, falling back to defaults (plus
/// environment overrides) when the file does not exist.
///
/// # Errors
///
/// Returns [`StartupError::Config`] if the file exists but is unreadable
/// or invalid, or an override is malformed.
pub fn load_config(path: &Path) -> Result<ChronicleConfig, StartupError> {
    if path.exists() {
        Ok(ChronicleConfig::from_file(path)?)
    } else {
        Ok(ChronicleConfig::parse("")?)
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Calling this
/// more than once keeps the first subscriber.
pub fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let result = match logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Load the dataset named by the configuration and wrap it in shared
/// application state.
///
/// # Errors
///
/// Returns [`StartupError::Catalog`] if the dataset is missing or
/// malformed.
pub fn build_state(config: &ChronicleConfig) -> Result<Arc<AppState>, StartupError> {
    let catalog = Catalog::load(&config.data.path)?;
    info!(
        events = catalog.len(),
        categories = catalog.categories().len(),
        year_range = ?catalog.year_range(),
        "Catalog ready"
    );
    Ok(Arc::new(AppState::new(catalog)))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn missing_dataset_is_fatal() {
        let mut config = ChronicleConfig::default();
        config.data.path = std::env::temp_dir().join("chronicle-startup-no-such-file.json");
        let result = build_state(&config);
        assert!(matches!(result, Err(StartupError::Catalog { .. })));
    }

    #[test]
    fn malformed_dataset_is_fatal() {
        let path = std::env::temp_dir().join(format!(
            "chronicle-startup-bad-{}.json",
            std::process::id()
        ));
        assert!(std::fs::write(&path, "[{\"title\": ").is_ok());

        let mut config = ChronicleConfig::default();
        config.data.path.clone_from(&path);
        let result = build_state(&config);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(StartupError::Catalog { .. })));
    }

    #[test]
    fn valid_dataset_builds_state() {
        let path = std::env::temp_dir().join(format!(
            "chronicle-startup-ok-{}.json",
            std::process::id()
        ));
        assert!(std::fs::write(&path, r#"[{"date": "1947-08-15", "title": "Independence"}]"#).is_ok());

        let mut config = ChronicleConfig::default();
        config.data.path.clone_from(&path);
        let result = build_state(&config);
        let _ = std::fs::remove_file(&path);

        assert!(result.is_ok());
        assert_eq!(result.map(|s| s.catalog.len()).unwrap_or(0), 1);
    }

    #[test]
    fn missing_config_file_uses_defaults() {
        let path = PathBuf::from("definitely-not-a-chronicle-config.yaml");
        let config = load_config(&path);
        assert!(config.is_ok());
    }
}
