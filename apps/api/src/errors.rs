use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::prompt::PromptError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required request field was absent. The request is a no-op.
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing prompt variable: {0}")]
    MissingVariable(String),

    /// LLM or lookup service error, timeout or auth failure.
    #[error("Remote call failed: {0}")]
    RemoteCall(String),

    #[error("Pipeline timed out after {0}s")]
    Timeout(u64),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<PromptError> for AppError {
    fn from(e: PromptError) -> Self {
        match e {
            PromptError::MissingVariable(name) => AppError::MissingVariable(name),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::MissingInput(field) => {
                tracing::debug!("Skipping pipeline run, missing input: {field}");
                return StatusCode::NO_CONTENT.into_response();
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::MissingVariable(name) => {
                tracing::error!("Implementation error: prompt variable '{name}' not supplied");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MISSING_VARIABLE",
                    "A prompt could not be rendered".to_string(),
                )
            }
            AppError::RemoteCall(msg) => {
                tracing::error!("Remote call error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "REMOTE_CALL_FAILED",
                    "An upstream service failed to respond".to_string(),
                )
            }
            AppError::Timeout(secs) => {
                tracing::warn!("Pipeline exceeded its {secs}s deadline");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "TIMEOUT",
                    format!("Suggestion pipeline did not finish within {secs}s"),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
