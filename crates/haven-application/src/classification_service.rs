//! Classification Service
//!
//! Turns raw evidence text into a [`Classification`]. The service never
//! fails: an unconfigured capability yields the degraded-mode default and
//! any transport or parse failure yields the fail-open result.

use crate::prompts::PromptRenderer;
use haven_core::capability::{
    AiCapability, CapabilityOutcome, CapabilityRequest, FieldType, ResponseSchema,
};
use haven_core::evidence::Classification;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Fields the model must return for a classification.
pub fn classification_schema() -> ResponseSchema {
    ResponseSchema::new()
        .field("category", FieldType::String)
        .field("severity", FieldType::String)
        .field("confidence", FieldType::Number)
        .field("summary", FieldType::String)
}

pub struct ClassificationService {
    capability: Arc<dyn AiCapability>,
    prompts: PromptRenderer,
}

impl ClassificationService {
    pub fn new(capability: Arc<dyn AiCapability>) -> Self {
        Self {
            capability,
            prompts: PromptRenderer::new(),
        }
    }

    /// Classifies `text`.
    ///
    /// Category and severity are passed through as returned by the model.
    pub async fn classify(&self, text: &str) -> Classification {
        if !self.capability.is_configured() {
            tracing::warn!("[Classification] No API key provided, returning mock analysis");
            return Classification::unconfigured();
        }

        let instruction = match self.prompts.classification(text) {
            Ok(instruction) => instruction,
            Err(err) => {
                tracing::error!("[Classification] Failed to render prompt: {}", err);
                return Classification::failed();
            }
        };

        let request = CapabilityRequest::structured(instruction, classification_schema());
        match self.capability.run(request).await {
            CapabilityOutcome::Unconfigured => Classification::unconfigured(),
            CapabilityOutcome::Success(raw) => match parse_json_object::<Classification>(&raw) {
                Ok(classification) => {
                    tracing::debug!(
                        category = %classification.category,
                        severity = %classification.severity,
                        "[Classification] Analysis complete"
                    );
                    classification
                }
                Err(err) => {
                    tracing::error!("[Classification] Unparseable response: {}", err);
                    Classification::failed()
                }
            },
            CapabilityOutcome::Failure(err) => {
                tracing::error!("[Classification] Gemini analysis error: {}", err);
                Classification::failed()
            }
        }
    }
}

/// Parses a JSON object, tolerating a surrounding markdown code fence.
pub(crate) fn parse_json_object<T: DeserializeOwned>(raw: &str) -> serde_json::Result<T> {
    let trimmed = raw.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);
    serde_json::from_str(body.trim())
}
