//! aqi server binary
//!
//! Loads the model named in the configuration, then serves the API.
//! Exits without listening if the model cannot be loaded.

use std::sync::Arc;

use aqi_core::AqiConfig;
use aqi_server::{serve, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AqiConfig::load(None)?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    match &config.source {
        Some(path) => tracing::debug!(path = %path.display(), "Using config file"),
        None => tracing::debug!("No config file found, using defaults"),
    }

    let state = match AppState::from_config(&config) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("Refusing to start: {}", e);
            return Err(e.into());
        }
    };
    serve(&config.server.addr, state).await
}
