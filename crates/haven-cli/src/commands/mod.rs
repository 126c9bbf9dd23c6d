pub mod classify;
pub mod demo;
pub mod supporters;

use anyhow::{Context, Result};
use haven_application::AppContext;
use haven_core::capability::{AiCapability, UnconfiguredCapability};
use haven_infrastructure::ConfigService;
use std::path::Path;
use std::sync::Arc;

/// Loads configuration and secrets and constructs the application context.
pub fn bootstrap(config_dir: Option<&Path>, offline: bool) -> Result<AppContext> {
    let service = ConfigService::new(config_dir);
    let config = service
        .load_config()
        .context("Failed to load config.toml")?;

    let capability: Arc<dyn AiCapability> = if offline {
        Arc::new(UnconfiguredCapability)
    } else {
        let secrets = service
            .load_secrets()
            .context("Failed to load secret.json")?;
        haven_interaction::build_capability(&secrets, &config.ai)
    };

    if !capability.is_configured() {
        tracing::warn!("Running without an API key; AI results are placeholders");
    }

    Ok(AppContext::new(&config, capability))
}
