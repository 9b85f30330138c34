// src/handlers/health.rs

use axum::{Json, response::IntoResponse};
use serde_json::json;

use crate::error::AppError;

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service is up")),
    tag = "health"
)]
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Fallback for unknown routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
