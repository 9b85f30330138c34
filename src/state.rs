// src/state.rs

use std::sync::Arc;

use crate::config::Config;
use crate::sanitizer::Sanitizer;
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sanitizer: Arc<Sanitizer>,
}

impl AppState {
    /// State with the default sanitization policy.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sanitizer: Arc::new(Sanitizer::default()),
        }
    }
}

impl FromRef<AppState> for Arc<Sanitizer> {
    fn from_ref(state: &AppState) -> Self {
        state.sanitizer.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
