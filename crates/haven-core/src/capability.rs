//! Generative-AI capability boundary.
//!
//! The classification and summarization services talk to the model only
//! through [`AiCapability`]. A request is instruction text plus an optional
//! structured-output schema; a response is the raw text the model produced
//! (a JSON object when a schema was given, free text otherwise).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Primitive type of a field in a structured response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    String,
    Number,
}

/// Flat object schema the model is constrained to emit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseSchema {
    fields: Vec<(String, FieldType)>,
}

impl ResponseSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field; insertion order is kept.
    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.push((name.into(), ty));
        self
    }

    pub fn fields(&self) -> &[(String, FieldType)] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A single request to the capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityRequest {
    pub instruction: String,
    pub schema: Option<ResponseSchema>,
}

impl CapabilityRequest {
    /// A free-text request (narrative output).
    pub fn text(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            schema: None,
        }
    }

    /// A request whose response must be a JSON object matching `schema`.
    pub fn structured(instruction: impl Into<String>, schema: ResponseSchema) -> Self {
        Self {
            instruction: instruction.into(),
            schema: Some(schema),
        }
    }
}

/// Failure modes of a configured capability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// No credential is configured. Callers degrade instead of failing.
    #[error("AI capability is not configured")]
    Unconfigured,

    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("provider error{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Provider {
        status: Option<u16>,
        message: String,
    },

    /// The provider answered but produced no text.
    #[error("provider returned no text")]
    EmptyResponse,
}

/// Outcome of one capability call, as seen by the services.
///
/// Keeping the three variants explicit lets a retry policy be slotted in
/// later without touching the services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityOutcome {
    Unconfigured,
    Success(String),
    Failure(CapabilityError),
}

impl From<Result<String, CapabilityError>> for CapabilityOutcome {
    fn from(result: Result<String, CapabilityError>) -> Self {
        match result {
            Ok(text) => Self::Success(text),
            Err(CapabilityError::Unconfigured) => Self::Unconfigured,
            Err(err) => Self::Failure(err),
        }
    }
}

/// Interface to a generative-AI provider.
#[async_trait]
pub trait AiCapability: Send + Sync {
    /// Whether a credential is available. When `false`, services return
    /// their degraded-mode defaults without calling [`generate`](Self::generate).
    fn is_configured(&self) -> bool;

    /// Sends one request and returns the raw response text.
    async fn generate(&self, request: CapabilityRequest) -> Result<String, CapabilityError>;

    /// Runs the request, folding the unconfigured case into the outcome.
    async fn run(&self, request: CapabilityRequest) -> CapabilityOutcome {
        if !self.is_configured() {
            return CapabilityOutcome::Unconfigured;
        }
        self.generate(request).await.into()
    }
}

/// Capability used when no credential is present.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredCapability;

#[async_trait]
impl AiCapability for UnconfiguredCapability {
    fn is_configured(&self) -> bool {
        false
    }

    async fn generate(&self, _request: CapabilityRequest) -> Result<String, CapabilityError> {
        Err(CapabilityError::Unconfigured)
    }
}
