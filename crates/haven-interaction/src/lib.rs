//! Provider implementations of the AI capability.

pub mod gemini_api_agent;

use haven_core::capability::{AiCapability, UnconfiguredCapability};
use haven_core::config::{AiSettings, SecretConfig};
use std::sync::Arc;

pub use gemini_api_agent::GeminiApiAgent;

/// Builds the capability for the given secrets.
///
/// Without a Gemini key this returns [`UnconfiguredCapability`], which makes
/// every service fall back to its degraded-mode defaults.
pub fn build_capability(secrets: &SecretConfig, settings: &AiSettings) -> Arc<dyn AiCapability> {
    match GeminiApiAgent::from_config(secrets, settings) {
        Some(agent) => {
            tracing::info!("[Capability] Using Gemini model {}", agent.model());
            Arc::new(agent)
        }
        None => Arc::new(UnconfiguredCapability),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_core::config::GeminiConfig;

    #[test]
    fn test_without_key_is_unconfigured() {
        let capability = build_capability(&SecretConfig::default(), &AiSettings::default());
        assert!(!capability.is_configured());
    }

    #[test]
    fn test_with_key_is_configured() {
        let secrets = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: "k".into(),
                model_name: None,
            }),
        };
        assert!(build_capability(&secrets, &AiSettings::default()).is_configured());
    }
}
