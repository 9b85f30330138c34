// src/models/policy.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::sanitizer::Policy;

/// DTO for the active sanitization policy.
/// Attribute patterns ending in `*` match any longer name with that prefix.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PolicyResponse {
    pub dangerous_elements: Vec<String>,
    pub dangerous_attributes: Vec<String>,
    pub dangerous_schemes: Vec<String>,
    pub allowed_tags: Vec<String>,
}

impl From<&Policy> for PolicyResponse {
    fn from(policy: &Policy) -> Self {
        Self {
            dangerous_elements: policy.dangerous_elements().map(String::from).collect(),
            dangerous_attributes: policy
                .dangerous_attributes()
                .map(|rule| rule.to_string())
                .collect(),
            dangerous_schemes: policy.dangerous_schemes().map(String::from).collect(),
            allowed_tags: policy.allowed_tags().map(String::from).collect(),
        }
    }
}
