// src/models/sanitize.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for `POST /api/sanitize`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SanitizeRequest {
    /// Raw, untrusted note content.
    #[validate(length(
        max = 100000,
        message = "Content length must be at most 100000 chars"
    ))]
    pub content: String,

    /// Overrides the server default. `false` returns the content untouched.
    #[serde(default)]
    pub sanitize: Option<bool>,
}

/// Response body for `POST /api/sanitize`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SanitizeResponse {
    pub sanitized: String,

    /// Whether the sanitizer actually ran.
    pub applied: bool,
}
