// src/docs.rs

use axum::Json;
use utoipa::OpenApi;

use crate::{
    handlers,
    models::{
        policy::PolicyResponse,
        sanitize::{SanitizeRequest, SanitizeResponse},
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::sanitize::sanitize_content,
        handlers::policy::get_policy,
        handlers::health::health_check
    ),
    components(schemas(SanitizeRequest, SanitizeResponse, PolicyResponse)),
    tags(
        (name = "sanitizer", description = "HTML sanitization of note content"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Serves the generated OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
