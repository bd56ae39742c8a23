//! Axum route handlers for the Generation API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;
use tracing::{info_span, warn, Instrument};
use uuid::Uuid;

use crate::contract::request::validate_request;
use crate::contract::response::GenerateResponse;
use crate::errors::AppError;
use crate::generation::generator::generate_names;
use crate::state::AppState;

/// POST /api/generate
///
/// Validates the body against the request contract before anything else runs,
/// then relays it through the generator. Malformed JSON is reported as a
/// `Bad Request` like any other contract violation.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let span = info_span!("generate", request_id = %Uuid::new_v4());

    async move {
        let Json(raw) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        let request = validate_request(&raw).map_err(|violations| {
            warn!(count = violations.len(), %violations, "Rejected generate request");
            AppError::BadRequest(violations.to_string())
        })?;

        let response = generate_names(state.generator.as_ref(), &request).await?;

        Ok::<_, AppError>(Json(response))
    }
    .instrument(span)
    .await
}
