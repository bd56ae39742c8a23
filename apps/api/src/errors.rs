use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders as `{ "ok": false, "error": <category>, "message": <detail> }`.
/// Only `BadRequest` exposes its detail to the caller; everything else is
/// logged server-side and answered with a generic message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream error: {0}")]
    Upstream(LlmError),

    #[error("Invalid model output: {0}")]
    InvalidOutput(String),
}

impl From<LlmError> for AppError {
    fn from(error: LlmError) -> Self {
        match error {
            LlmError::MissingApiKey => AppError::Configuration(error.to_string()),
            other => AppError::Upstream(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", msg.clone()),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration Error",
                    "The name generation service is not configured".to_string(),
                )
            }
            AppError::Upstream(e) => {
                tracing::error!("Upstream error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate names",
                    "The name generation service is unavailable, please try again later"
                        .to_string(),
                )
            }
            AppError::InvalidOutput(msg) => {
                tracing::error!("Invalid model output: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate names",
                    "The name generation service returned an invalid result".to_string(),
                )
            }
        };

        let body = Json(json!({
            "ok": false,
            "error": error,
            "message": message
        }));

        (status, body).into_response()
    }
}
