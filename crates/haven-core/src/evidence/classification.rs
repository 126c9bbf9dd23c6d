//! Threat classification attached to evidence.
//!
//! Category and severity come straight from the model's structured output
//! and are not validated: a value outside the known set is kept verbatim in
//! the `Other` variant so it round-trips unchanged.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Kind of harassment a piece of evidence represents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Threat,
    Doxxing,
    Stalking,
    HateSpeech,
    Defamation,
    Harassment,
    Unknown,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Threat => "threat",
            Self::Doxxing => "doxxing",
            Self::Stalking => "stalking",
            Self::HateSpeech => "hate_speech",
            Self::Defamation => "defamation",
            Self::Harassment => "harassment",
            Self::Unknown => "unknown",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "threat" => Self::Threat,
            "doxxing" => Self::Doxxing,
            "stalking" => Self::Stalking,
            "hate_speech" => Self::HateSpeech,
            "defamation" => Self::Defamation,
            "harassment" => Self::Harassment,
            "unknown" => Self::Unknown,
            _ => Self::Other(raw),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How serious a piece of evidence is.
///
/// Ordered `low < medium < high < critical`; unrecognised values rank below
/// `low`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
    Other(String),
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
            Self::Other(raw) => raw,
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            Self::Other(_) => 0,
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }

    /// `high` or `critical`.
    pub fn is_elevated(&self) -> bool {
        self.rank() >= Self::High.rank()
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank()
            .cmp(&other.rank())
            .then_with(|| self.as_str().cmp(other.as_str()))
    }
}

impl From<String> for Severity {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            "critical" => Self::Critical,
            _ => Self::Other(raw),
        }
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured threat judgment for one evidence item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    pub severity: Severity,
    /// Model confidence, nominally in `[0, 1]`.
    pub confidence: f64,
    /// One-sentence rationale.
    pub summary: String,
}

impl Classification {
    /// Degraded-mode result used when no AI credential is configured.
    pub fn unconfigured() -> Self {
        Self {
            category: Category::Harassment,
            severity: Severity::Medium,
            confidence: 0.85,
            summary: "Analysis unavailable (Missing API Key). Manual review required.".to_string(),
        }
    }

    /// Fail-open result used when the capability errors or returns garbage.
    pub fn failed() -> Self {
        Self {
            category: Category::Unknown,
            severity: Severity::Low,
            confidence: 0.0,
            summary: "AI analysis failed. Please review manually.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::High < Severity::Critical);
        assert!(Severity::Other("extreme".into()) < Severity::Low);
        assert!(Severity::Critical.is_elevated());
        assert!(!Severity::Medium.is_elevated());
    }

    #[test]
    fn test_out_of_enum_values_pass_through() {
        let json = r#"{"category":"spam","severity":"severe","confidence":1.2,"summary":"x"}"#;
        let parsed: Classification = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.category, Category::Other("spam".into()));
        assert_eq!(parsed.severity, Severity::Other("severe".into()));

        let back = serde_json::to_value(&parsed).unwrap();
        assert_eq!(back["category"], "spam");
        assert_eq!(back["severity"], "severe");
    }

    #[test]
    fn test_known_values_parse() {
        let json = r#"{"category":"hate_speech","severity":"critical","confidence":0.9,"summary":"x"}"#;
        let parsed: Classification = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.category, Category::HateSpeech);
        assert_eq!(parsed.severity, Severity::Critical);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        assert!(serde_json::from_str::<Classification>("{}").is_err());
    }
}
