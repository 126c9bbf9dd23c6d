//! GeminiApiAgent - Direct REST API implementation for Gemini.
//!
//! Structured requests set `responseMimeType = application/json` and send the
//! schema as `responseSchema`, so the model is constrained to emit a flat
//! JSON object. The response text is returned untouched; parsing is the
//! caller's job.

use async_trait::async_trait;
use haven_core::capability::{
    AiCapability, CapabilityError, CapabilityRequest, FieldType, ResponseSchema,
};
use haven_core::config::{AiSettings, SecretConfig};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Agent implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl std::fmt::Debug for GeminiApiAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiApiAgent")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Builds an agent from loaded secrets; `None` when no key is configured.
    ///
    /// A `model_name` in `secret.json` wins over `[ai] model` in `config.toml`.
    pub fn from_config(secrets: &SecretConfig, settings: &AiSettings) -> Option<Self> {
        let api_key = secrets.gemini_api_key()?;
        let model = secrets
            .gemini
            .as_ref()
            .and_then(|g| g.model_name.clone())
            .unwrap_or_else(|| settings.model.clone());
        Some(Self::new(api_key, model))
    }

    /// Points the agent at a different endpoint root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String, CapabilityError> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| CapabilityError::Transport(format!("Gemini API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            CapabilityError::Transport(format!("Failed to parse Gemini response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl AiCapability for GeminiApiAgent {
    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn generate(&self, request: CapabilityRequest) -> Result<String, CapabilityError> {
        tracing::debug!(
            model = %self.model,
            structured = request.schema.is_some(),
            "[Gemini] generateContent"
        );
        let body = GenerateContentRequest::from_request(&request);
        self.send_request(&body).await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    fn from_request(request: &CapabilityRequest) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: request.instruction.clone(),
                }],
            }],
            generation_config: request.schema.as_ref().map(|schema| GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema_to_json(schema),
            }),
        }
    }
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn schema_to_json(schema: &ResponseSchema) -> Value {
    let properties: Map<String, Value> = schema
        .fields()
        .iter()
        .map(|(name, ty)| {
            let type_name = match ty {
                FieldType::String => "STRING",
                FieldType::Number => "NUMBER",
            };
            (name.clone(), json!({ "type": type_name }))
        })
        .collect();

    json!({ "type": "OBJECT", "properties": properties })
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String, CapabilityError> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .filter(|text| !text.trim().is_empty())
        .ok_or(CapabilityError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: String) -> CapabilityError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    CapabilityError::Provider {
        status: Some(status.as_u16()),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_core::config::GeminiConfig;

    #[test]
    fn test_structured_request_body() {
        let schema = ResponseSchema::new()
            .field("category", FieldType::String)
            .field("confidence", FieldType::Number);
        let body = GenerateContentRequest::from_request(&CapabilityRequest::structured(
            "classify this",
            schema,
        ));
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["contents"][0]["parts"][0]["text"], "classify this");
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        let properties = &value["generationConfig"]["responseSchema"]["properties"];
        assert_eq!(properties["category"]["type"], "STRING");
        assert_eq!(properties["confidence"]["type"], "NUMBER");
    }

    #[test]
    fn test_text_request_has_no_generation_config() {
        let body = GenerateContentRequest::from_request(&CapabilityRequest::text("summarize"));
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn test_extract_text_response() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"title\":\"t\"}" }] } }]
        }))
        .unwrap();
        assert_eq!(extract_text_response(response).unwrap(), "{\"title\":\"t\"}");
    }

    #[test]
    fn test_extract_empty_response() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [] })).unwrap();
        assert_eq!(
            extract_text_response(response).unwrap_err(),
            CapabilityError::EmptyResponse
        );
    }

    #[test]
    fn test_map_http_error_reads_provider_body() {
        let body = r#"{"error":{"code":403,"message":"API key not valid","status":"PERMISSION_DENIED"}}"#;
        let err = map_http_error(StatusCode::FORBIDDEN, body.to_string());
        assert_eq!(
            err,
            CapabilityError::Provider {
                status: Some(403),
                message: "PERMISSION_DENIED: API key not valid".into(),
            }
        );
    }

    #[test]
    fn test_from_config_prefers_secret_model_name() {
        let secrets = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: "key".into(),
                model_name: Some("gemini-2.0-flash".into()),
            }),
        };
        let agent = GeminiApiAgent::from_config(&secrets, &AiSettings::default()).unwrap();
        assert_eq!(agent.model(), "gemini-2.0-flash");
        assert!(agent.is_configured());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let agent = GeminiApiAgent::new("key", "gemini-2.5-flash").with_base_url("http://127.0.0.1:9");
        let err = agent
            .generate(CapabilityRequest::text("hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, CapabilityError::Transport(_)));
    }
}
