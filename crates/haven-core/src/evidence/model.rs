//! Evidence item domain model.

use super::classification::Classification;
use super::fingerprint::fingerprint;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Platform the harassment was observed on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Platform {
    Twitter,
    Instagram,
    Facebook,
    Email,
    Whatsapp,
    Other,
}

/// One logged piece of evidence.
///
/// The fingerprint is computed once from `content` at construction and never
/// recomputed. `classification` starts empty and is attached exactly once by
/// the enrichment step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub id: String,
    pub content: String,
    pub platform: Platform,
    /// When the incident happened (ISO 8601 format).
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(rename = "hash")]
    fingerprint: String,
}

impl EvidenceItem {
    pub fn new(
        id: impl Into<String>,
        content: impl Into<String>,
        platform: Platform,
        timestamp: impl Into<String>,
    ) -> Self {
        let content = content.into();
        Self {
            id: id.into(),
            fingerprint: fingerprint(&content),
            content,
            platform,
            timestamp: timestamp.into(),
            classification: None,
        }
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Whether the stored fingerprint still matches the content.
    pub fn verify(&self) -> bool {
        fingerprint(&self.content) == self.fingerprint
    }

    pub fn is_classified(&self) -> bool {
        self.classification.is_some()
    }
}
