// src/handlers/policy.rs

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{models::policy::PolicyResponse, sanitizer::Sanitizer};

/// Returns the policy the sanitizer runs with.
#[utoipa::path(
    get,
    path = "/api/policy",
    responses((status = 200, description = "Active sanitization policy", body = PolicyResponse)),
    tag = "sanitizer"
)]
pub async fn get_policy(State(sanitizer): State<Arc<Sanitizer>>) -> Json<PolicyResponse> {
    Json(PolicyResponse::from(sanitizer.policy()))
}
