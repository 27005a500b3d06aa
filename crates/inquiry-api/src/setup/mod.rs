//! Application setup and initialization
//!
//! Everything `main` needs to go from a loaded [`Config`] to a ready router.

pub mod routes;
pub mod server;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use inquiry_core::Config;
use inquiry_storage::create_store;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Telemetry first so validation warnings are visible
    inquiry_infra::init_telemetry(config.log_format, "inquiry-api", &config.environment)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    let store = create_store(&config)
        .await
        .context("Failed to initialize key-value store")?;
    tracing::info!(backend = %store.backend_type(), "Key-value store ready");

    let state = Arc::new(AppState::new(config, store));
    let router = routes::setup_routes(state.clone())?;

    Ok((state, router))
}
