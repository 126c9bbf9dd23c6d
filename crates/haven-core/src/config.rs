//! Configuration models.
//!
//! `RootConfig` mirrors `config.toml`; `SecretConfig` mirrors `secret.json`.
//! Loading from disk lives in `haven-infrastructure`.

use serde::{Deserialize, Serialize};

/// Default Gemini model used for classification and summaries.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Default simulated network latency for identity operations.
pub const DEFAULT_SIMULATED_LATENCY_MS: u64 = 800;

/// Root application configuration (`config.toml`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootConfig {
    #[serde(default)]
    pub identity: IdentitySettings,
    #[serde(default)]
    pub ai: AiSettings,
}

/// Identity store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentitySettings {
    /// Delay applied before `login`/`register` resolve.
    #[serde(default = "default_latency")]
    pub simulated_latency_ms: u64,
}

impl Default for IdentitySettings {
    fn default() -> Self {
        Self {
            simulated_latency_ms: DEFAULT_SIMULATED_LATENCY_MS,
        }
    }
}

fn default_latency() -> u64 {
    DEFAULT_SIMULATED_LATENCY_MS
}

/// AI capability settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiSettings {
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_GEMINI_MODEL.to_string(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

/// Root structure of `secret.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

impl SecretConfig {
    /// Returns the Gemini API key if one is configured and non-empty.
    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini
            .as_ref()
            .map(|g| g.api_key.trim())
            .filter(|key| !key.is_empty())
    }

    /// Overlays an API key taken from the environment.
    ///
    /// `lookup` is consulted for `GEMINI_API_KEY` first, then `API_KEY`.
    /// An existing `model_name` is kept.
    pub fn with_env_override<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = ["GEMINI_API_KEY", "API_KEY"]
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty());

        if let Some(api_key) = key {
            let model_name = self.gemini.take().and_then(|g| g.model_name);
            self.gemini = Some(GeminiConfig {
                api_key,
                model_name,
            });
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_config_defaults_from_empty_toml() {
        let config: RootConfig = toml::from_str("").unwrap();
        assert_eq!(config.identity.simulated_latency_ms, 800);
        assert_eq!(config.ai.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_root_config_partial_toml() {
        let config: RootConfig = toml::from_str("[identity]\nsimulated_latency_ms = 0\n").unwrap();
        assert_eq!(config.identity.simulated_latency_ms, 0);
        assert_eq!(config.ai, AiSettings::default());
    }

    #[test]
    fn test_blank_key_is_unconfigured() {
        let secrets = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: "   ".into(),
                model_name: None,
            }),
        };
        assert_eq!(secrets.gemini_api_key(), None);
    }

    #[test]
    fn test_env_override_prefers_gemini_key() {
        let secrets = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: "from-file".into(),
                model_name: Some("gemini-2.0".into()),
            }),
        }
        .with_env_override(|name| match name {
            "GEMINI_API_KEY" => Some("from-env".into()),
            "API_KEY" => Some("fallback".into()),
            _ => None,
        });

        let gemini = secrets.gemini.unwrap();
        assert_eq!(gemini.api_key, "from-env");
        assert_eq!(gemini.model_name.as_deref(), Some("gemini-2.0"));
    }

    #[test]
    fn test_env_override_absent_keeps_file() {
        let secrets = SecretConfig::default().with_env_override(|_| None);
        assert!(secrets.gemini.is_none());
    }
}
