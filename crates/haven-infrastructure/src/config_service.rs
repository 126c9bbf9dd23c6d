//! Configuration service implementation.
//!
//! Loads `config.toml` and `secret.json` from the haven config directory.
//! Missing files yield defaults; malformed files are errors.

use crate::paths::{HavenPaths, ServiceType};
use haven_core::config::{RootConfig, SecretConfig};
use haven_core::{HavenError, Result};
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    paths: HavenPaths,
}

impl ConfigService {
    pub fn new(base_path: Option<&Path>) -> Self {
        Self {
            paths: HavenPaths::new(base_path),
        }
    }

    /// Loads the root configuration, defaulting when the file is absent.
    pub fn load_config(&self) -> Result<RootConfig> {
        let path = self
            .paths
            .get_path(ServiceType::Config)
            .map_err(|e| HavenError::config(e.to_string()))?;

        match read_optional(&path)? {
            Some(content) => Ok(toml::from_str(&content)?),
            None => {
                tracing::debug!("[ConfigService] {} not found, using defaults", path.display());
                Ok(RootConfig::default())
            }
        }
    }

    /// Loads secrets from `secret.json`, then overlays `GEMINI_API_KEY`/`API_KEY`.
    pub fn load_secrets(&self) -> Result<SecretConfig> {
        let path = self
            .paths
            .get_path(ServiceType::Secret)
            .map_err(|e| HavenError::config(e.to_string()))?;

        let from_file = match read_optional(&path)? {
            Some(content) => serde_json::from_str(&content)?,
            None => SecretConfig::default(),
        };

        let secrets = from_file.with_env_override(|name| std::env::var(name).ok());
        if secrets.gemini_api_key().is_none() {
            tracing::warn!("[ConfigService] No Gemini API key configured; AI features run in degraded mode");
        }
        Ok(secrets)
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}
