/// LLM Client — the single point of entry for all completion-service calls.
///
/// No other module may call the Gemini API directly. Handlers reach it through
/// the `CompletionClient` trait held in `AppState`, so tests can swap in a stub.
///
/// One round trip per call. There is no retry: every failure is terminal for
/// the request that triggered it.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

pub mod prompts;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Completion service API key is not configured")]
    MissingApiKey,

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Completion service unavailable: {message}")]
    ServiceUnavailable {
        status: Option<u16>,
        message: String,
        body: Option<String>,
    },

    #[error("Completion service returned no candidates")]
    EmptyResponse { raw: Value },

    #[error("Completion service response could not be read: {reason}")]
    MalformedEnvelope { reason: String, raw: String },
}

/// A single prompt to send, with an optional system instruction.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub prompt: &'a str,
    pub system: Option<&'a str>,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(prompt: &'a str) -> Self {
        Self {
            prompt,
            system: None,
        }
    }

    pub fn with_system(mut self, system: &'a str) -> Self {
        self.system = Some(system);
        self
    }
}

/// Anything that can turn a prompt into raw model text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Response envelope. Every level is optional so that a missing field is
/// classified by us rather than rejected wholesale by serde.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// GeminiClient
// ────────────────────────────────────────────────────────────────────────────

/// Connection settings for `GeminiClient`.
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub timeout: Duration,
}

impl From<&Config> for GeminiSettings {
    fn from(config: &Config) -> Self {
        Self {
            api_key: config.gemini_api_key.clone(),
            api_base: config.gemini_api_base.clone(),
            model: config.gemini_model.clone(),
            timeout: Duration::from_secs(config.llm_timeout_secs),
        }
    }
}

/// The long-lived completion client, built once at startup and shared by
/// every request.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Result<Self, LlmError> {
        if settings.api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| LlmError::ClientBuild(e.to_string()))?;

        let endpoint = format!(
            "{}/models/{}:generateContent",
            settings.api_base.trim_end_matches('/'),
            settings.model
        );

        Ok(Self {
            client,
            api_key: settings.api_key,
            endpoint,
            model: settings.model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: request.prompt,
                }],
            }],
            system_instruction: request.system.map(|text| Content {
                role: None,
                parts: vec![Part { text }],
            }),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            warn!("Completion service returned {}: {}", status, body);
            return Err(LlmError::ServiceUnavailable {
                status: Some(status.as_u16()),
                message: format!("completion service returned status {}", status.as_u16()),
                body: Some(body),
            });
        }

        debug!("Raw completion envelope: {}", body);
        extract_text(&body)
    }
}

fn transport_error(e: reqwest::Error) -> LlmError {
    // the URL carries the API key as a query parameter
    let e = e.without_url();
    let message = if e.is_timeout() {
        "completion service timed out".to_string()
    } else {
        format!("completion service request failed: {e}")
    };
    warn!("{message}");
    LlmError::ServiceUnavailable {
        status: None,
        message,
        body: None,
    }
}

/// Pulls `candidates[0].content.parts[0].text` out of a raw envelope.
fn extract_text(body: &str) -> Result<String, LlmError> {
    let raw: Value = serde_json::from_str(body).map_err(|e| LlmError::MalformedEnvelope {
        reason: format!("body is not JSON: {e}"),
        raw: body.to_string(),
    })?;

    let envelope: GenerateContentResponse =
        serde_json::from_value(raw.clone()).map_err(|e| LlmError::MalformedEnvelope {
            reason: e.to_string(),
            raw: body.to_string(),
        })?;

    let first = match envelope.candidates {
        Some(candidates) if !candidates.is_empty() => candidates.into_iter().next(),
        _ => return Err(LlmError::EmptyResponse { raw }),
    };

    first
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| LlmError::MalformedEnvelope {
            reason: "candidate has no text part".to_string(),
            raw: body.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL_PATH: &str = "/models/test-model:generateContent";

    fn settings(api_base: &str) -> GeminiSettings {
        GeminiSettings {
            api_key: "test-key".to_string(),
            api_base: api_base.to_string(),
            model: "test-model".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    fn text_envelope(text: &str) -> Value {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
    }

    #[test]
    fn test_empty_api_key_rejected_before_any_call() {
        let mut s = settings("http://localhost:1");
        s.api_key = String::new();
        assert!(matches!(GeminiClient::new(s), Err(LlmError::MissingApiKey)));
    }

    #[test]
    fn test_extract_text_reads_first_part() {
        let body = text_envelope("hello").to_string();
        assert_eq!(extract_text(&body).unwrap(), "hello");
    }

    #[test]
    fn test_extract_text_missing_candidates_is_empty_response() {
        let body = json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string();
        match extract_text(&body) {
            Err(LlmError::EmptyResponse { raw }) => {
                assert_eq!(raw["promptFeedback"]["blockReason"], "SAFETY");
            }
            other => panic!("expected EmptyResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_text_empty_candidates_is_empty_response() {
        let body = json!({ "candidates": [] }).to_string();
        assert!(matches!(
            extract_text(&body),
            Err(LlmError::EmptyResponse { .. })
        ));
    }

    #[test]
    fn test_extract_text_without_parts_is_malformed() {
        let body = json!({ "candidates": [{ "finishReason": "MAX_TOKENS" }] }).to_string();
        assert!(matches!(
            extract_text(&body),
            Err(LlmError::MalformedEnvelope { .. })
        ));
    }

    #[test]
    fn test_extract_text_non_json_is_malformed() {
        match extract_text("<html>oops</html>") {
            Err(LlmError::MalformedEnvelope { raw, .. }) => assert_eq!(raw, "<html>oops</html>"),
            other => panic!("expected MalformedEnvelope, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_sends_prompt_and_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{ "role": "user", "parts": [{ "text": "the prompt" }] }],
                "systemInstruction": { "parts": [{ "text": "be terse" }] }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_envelope("model says hi")))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(settings(&server.uri())).unwrap();
        let text = client
            .complete(CompletionRequest::new("the prompt").with_system("be terse"))
            .await
            .unwrap();
        assert_eq!(text, "model says hi");
    }

    #[tokio::test]
    async fn test_complete_omits_system_instruction_when_absent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(|req: &wiremock::Request| {
                let body: Value = serde_json::from_slice(&req.body).unwrap();
                let text = if body.get("systemInstruction").is_some() {
                    "unexpected"
                } else {
                    "ok"
                };
                ResponseTemplate::new(200).set_body_json(text_envelope(text))
            })
            .mount(&server)
            .await;

        let client = GeminiClient::new(settings(&server.uri())).unwrap();
        let text = client
            .complete(CompletionRequest::new("p"))
            .await
            .unwrap();
        assert_eq!(text, "ok");
    }

    #[tokio::test]
    async fn test_non_success_status_is_service_unavailable_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(
                ResponseTemplate::new(503).set_body_string(r#"{"error":"overloaded"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(settings(&server.uri())).unwrap();
        match client.complete(CompletionRequest::new("p")).await {
            Err(LlmError::ServiceUnavailable { status, body, .. }) => {
                assert_eq!(status, Some(503));
                assert!(body.unwrap().contains("overloaded"));
            }
            other => panic!("expected ServiceUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_client_error_status_is_service_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad key"))
            .mount(&server)
            .await;

        let client = GeminiClient::new(settings(&server.uri())).unwrap();
        assert!(matches!(
            client.complete(CompletionRequest::new("p")).await,
            Err(LlmError::ServiceUnavailable {
                status: Some(400),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_timeout_is_service_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(text_envelope("late"))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let mut s = settings(&server.uri());
        s.timeout = Duration::from_millis(50);
        let client = GeminiClient::new(s).unwrap();
        assert!(matches!(
            client.complete(CompletionRequest::new("p")).await,
            Err(LlmError::ServiceUnavailable { status: None, .. })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_service_unavailable() {
        // Nothing listens on port 9 in the test environment.
        let client = GeminiClient::new(settings("http://127.0.0.1:9")).unwrap();
        assert!(matches!(
            client.complete(CompletionRequest::new("p")).await,
            Err(LlmError::ServiceUnavailable { .. })
        ));
    }
}
