// src/handlers/sanitize.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::sanitize::{SanitizeRequest, SanitizeResponse},
    sanitizer::Sanitizer,
};

/// Sanitize a piece of note content.
///
/// The `sanitize` flag of the request wins over the server default. When
/// sanitizing is off the raw content is echoed back with `applied: false`.
#[utoipa::path(
    post,
    path = "/api/sanitize",
    request_body = SanitizeRequest,
    responses(
        (status = 200, description = "Sanitized (or passed through) content", body = SanitizeResponse),
        (status = 400, description = "Content failed validation")
    ),
    tag = "sanitizer"
)]
pub async fn sanitize_content(
    State(sanitizer): State<Arc<Sanitizer>>,
    State(config): State<Config>,
    Json(payload): Json<SanitizeRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let enabled = payload.sanitize.unwrap_or(config.sanitize_by_default);
    if !enabled {
        tracing::warn!(
            content_len = payload.content.len(),
            "Sanitizer disabled for request, returning raw content"
        );
        return Ok(Json(SanitizeResponse {
            sanitized: payload.content,
            applied: false,
        }));
    }

    // CPU-bound; keep it off the async workers.
    let content = payload.content;
    let sanitized = tokio::task::spawn_blocking(move || sanitizer.sanitize(&content))
        .await
        .map_err(|e| {
            tracing::error!("Sanitizer task failed: {:?}", e);
            AppError::from(e)
        })?;

    Ok(Json(SanitizeResponse {
        sanitized,
        applied: true,
    }))
}
