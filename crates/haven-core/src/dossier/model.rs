//! Dossier domain model.

use crate::evidence::{EvidenceItem, Severity};
use serde::{Deserialize, Serialize};

/// Title placed on a dossier until metadata generation resolves.
pub const PLACEHOLDER_TITLE: &str = "New Dossier";

/// Description placed on a dossier until metadata generation resolves.
pub const PLACEHOLDER_DESCRIPTION: &str = "Generating…";

/// A named, timestamped bundle of evidence prepared for external review.
///
/// Items are held by value. After creation only `ai_summary`, `title` and
/// `description` are ever written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dossier {
    pub id: String,
    pub title: String,
    pub description: String,
    pub items: Vec<EvidenceItem>,
    /// Generation timestamp (ISO 8601 format).
    pub generated_at: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
}

impl Dossier {
    pub fn item_contents(&self) -> Vec<String> {
        self.items.iter().map(|item| item.content.clone()).collect()
    }
}

/// Title/description pair generated for a dossier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DossierMetadata {
    pub title: String,
    pub description: String,
}

impl DossierMetadata {
    pub fn unconfigured() -> Self {
        Self {
            title: "New Dossier (Auto-Generated)".to_string(),
            description: "Summary unavailable (Missing API Key).".to_string(),
        }
    }

    pub fn failed() -> Self {
        Self {
            title: "Auto-Generated Dossier".to_string(),
            description: "AI generation failed.".to_string(),
        }
    }
}

/// Highest severity among the classified items.
///
/// Unclassified items count as `low`, so the result is never below `low`.
pub fn aggregate_severity(items: &[EvidenceItem]) -> Severity {
    items
        .iter()
        .filter_map(|item| item.classification.as_ref())
        .map(|classification| classification.severity.clone())
        .fold(Severity::Low, std::cmp::max)
}
