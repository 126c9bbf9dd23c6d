//! Summarization Service
//!
//! Narrative summaries and title/description metadata for dossiers. Same
//! policy as classification: degrade when unconfigured, fail open on error.

use crate::classification_service::parse_json_object;
use crate::prompts::PromptRenderer;
use haven_core::capability::{
    AiCapability, CapabilityError, CapabilityOutcome, CapabilityRequest, FieldType, ResponseSchema,
};
use haven_core::dossier::DossierMetadata;
use std::sync::Arc;

pub const SUMMARY_UNCONFIGURED: &str = "Summary unavailable (Missing API Key).";
pub const SUMMARY_EMPTY: &str = "Could not generate summary.";
pub const SUMMARY_FAILED: &str = "Error generating summary.";

/// Fields the model must return for dossier metadata.
pub fn metadata_schema() -> ResponseSchema {
    ResponseSchema::new()
        .field("title", FieldType::String)
        .field("description", FieldType::String)
}

pub struct SummarizationService {
    capability: Arc<dyn AiCapability>,
    prompts: PromptRenderer,
}

impl SummarizationService {
    pub fn new(capability: Arc<dyn AiCapability>) -> Self {
        Self {
            capability,
            prompts: PromptRenderer::new(),
        }
    }

    /// Writes a narrative executive summary of the evidence texts.
    pub async fn summarize(&self, texts: &[String]) -> String {
        if !self.capability.is_configured() {
            return SUMMARY_UNCONFIGURED.to_string();
        }

        let instruction = match self.prompts.summary(texts) {
            Ok(instruction) => instruction,
            Err(err) => {
                tracing::error!("[Summarization] Failed to render prompt: {}", err);
                return SUMMARY_FAILED.to_string();
            }
        };

        match self.capability.run(CapabilityRequest::text(instruction)).await {
            CapabilityOutcome::Unconfigured => SUMMARY_UNCONFIGURED.to_string(),
            CapabilityOutcome::Success(text) if text.trim().is_empty() => SUMMARY_EMPTY.to_string(),
            CapabilityOutcome::Success(text) => text.trim().to_string(),
            CapabilityOutcome::Failure(CapabilityError::EmptyResponse) => SUMMARY_EMPTY.to_string(),
            CapabilityOutcome::Failure(err) => {
                tracing::error!("[Summarization] Gemini summary error: {}", err);
                SUMMARY_FAILED.to_string()
            }
        }
    }

    /// Generates a title and description for a dossier.
    pub async fn generate_metadata(&self, texts: &[String]) -> DossierMetadata {
        if !self.capability.is_configured() {
            return DossierMetadata::unconfigured();
        }

        let instruction = match self.prompts.metadata(texts) {
            Ok(instruction) => instruction,
            Err(err) => {
                tracing::error!("[Summarization] Failed to render prompt: {}", err);
                return DossierMetadata::failed();
            }
        };

        let request = CapabilityRequest::structured(instruction, metadata_schema());
        match self.capability.run(request).await {
            CapabilityOutcome::Unconfigured => DossierMetadata::unconfigured(),
            CapabilityOutcome::Success(raw) => {
                parse_json_object::<DossierMetadata>(&raw).unwrap_or_else(|err| {
                    tracing::error!("[Summarization] Unparseable metadata: {}", err);
                    DossierMetadata::failed()
                })
            }
            CapabilityOutcome::Failure(err) => {
                tracing::error!("[Summarization] Gemini metadata error: {}", err);
                DossierMetadata::failed()
            }
        }
    }
}
