//! Chronicle server binary.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `chronicle-config.yaml` (or the path in
//!    `CHRONICLE_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Load the dataset and build the catalog (fatal on failure)
//! 4. Serve the HTTP API until `Ctrl-C`

use std::path::PathBuf;

use chronicle_server::startup::{self, DEFAULT_CONFIG_PATH};
use tracing::info;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, dataset loading, or the server
/// fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config_path = std::env::var("CHRONICLE_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = startup::load_config(&config_path)?;

    // 2. Initialize structured logging.
    startup::init_tracing(&config.logging);
    info!(
        config = %config_path.display(),
        data = %config.data.path.display(),
        host = %config.server.host,
        port = config.server.port,
        "chronicle-server starting"
    );

    // 3. Build the catalog. The process never serves without one.
    let state = startup::build_state(&config)?;

    // 4. Serve.
    chronicle_server::start_server(&config.server, state)
        .await
        .map_err(startup::StartupError::from)?;

    info!("chronicle-server shutdown complete");
    Ok(())
}
