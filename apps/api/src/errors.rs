use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::extract::ExtractError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{message}")]
    ServiceUnavailable { message: String, raw: Option<Value> },

    #[error("No candidates returned from the AI service")]
    EmptyResponse { raw: Value },

    #[error("Malformed AI service response: {reason}")]
    MalformedEnvelope { reason: String, raw: String },

    #[error("No JSON found in AI response")]
    NoJsonFound { raw: String },

    #[error("AI response could not be parsed: {reason}")]
    UnparsableModelOutput { reason: String, raw: String },
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::MissingApiKey | LlmError::ClientBuild(_) => {
                AppError::Configuration(e.to_string())
            }
            LlmError::ServiceUnavailable {
                status,
                message,
                body,
            } => AppError::ServiceUnavailable {
                message,
                raw: body.map(|body| {
                    // keep JSON error bodies structured for the UI's debug view
                    let body = serde_json::from_str(&body).unwrap_or(Value::String(body));
                    json!({ "status": status, "body": body })
                }),
            },
            LlmError::EmptyResponse { raw } => AppError::EmptyResponse { raw },
            LlmError::MalformedEnvelope { reason, raw } => {
                AppError::MalformedEnvelope { reason, raw }
            }
        }
    }
}

impl From<ExtractError> for AppError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::NoJsonFound { raw } => AppError::NoJsonFound { raw },
            ExtractError::UnparsableModelOutput { reason, raw } => {
                AppError::UnparsableModelOutput { reason, raw }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, raw) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
            }
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "METHOD_NOT_ALLOWED",
                "Method not allowed".to_string(),
                None,
            ),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    "AI service is not configured".to_string(),
                    None,
                )
            }
            AppError::ServiceUnavailable { message, raw } => {
                tracing::error!("AI service unavailable: {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SERVICE_UNAVAILABLE",
                    "AI service is unavailable".to_string(),
                    raw.clone(),
                )
            }
            AppError::EmptyResponse { raw } => {
                tracing::error!("AI service returned no candidates");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EMPTY_RESPONSE",
                    self.to_string(),
                    Some(raw.clone()),
                )
            }
            AppError::MalformedEnvelope { reason, raw } => {
                tracing::error!("Malformed AI service response: {reason}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MALFORMED_ENVELOPE",
                    "Malformed AI service response".to_string(),
                    Some(Value::String(raw.clone())),
                )
            }
            AppError::NoJsonFound { raw } => {
                tracing::error!("No JSON found in AI response");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "NO_JSON_FOUND",
                    self.to_string(),
                    Some(Value::String(raw.clone())),
                )
            }
            AppError::UnparsableModelOutput { reason, raw } => {
                tracing::error!("Unparsable AI response: {reason}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UNPARSABLE_MODEL_OUTPUT",
                    "AI response could not be parsed".to_string(),
                    Some(Value::String(raw.clone())),
                )
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(raw) = raw {
            body["raw"] = raw;
        }

        (status, Json(body)).into_response()
    }
}
