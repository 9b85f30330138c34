// src/routes.rs

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    docs,
    handlers::{health, policy, sanitize},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Mounts the sanitizer API under `/api` and the OpenAPI document.
/// * Applies global middleware (Trace, CORS, optional rate limiting).
/// * Injects global state (Config, Sanitizer).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/sanitize", post(sanitize::sanitize_content))
        .route("/policy", get(policy::get_policy))
        .route("/health", get(health::health_check));

    let mut router = Router::new()
        .nest("/api", api_routes)
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .fallback(health::not_found);

    // Keyed by peer IP: the server must be started with connect info.
    if let Some(limit) = state.config.rate_limit {
        let governor_conf = GovernorConfigBuilder::default()
            .per_second(limit.per_second)
            .burst_size(limit.burst_size)
            .finish();

        match governor_conf {
            Some(governor_conf) => {
                tracing::info!(
                    per_second = limit.per_second,
                    burst_size = limit.burst_size,
                    "Rate limiting enabled"
                );
                router = router.layer(GovernorLayer::new(Arc::new(governor_conf)));
            }
            None => tracing::warn!("Rate limit settings rejected, limiter disabled"),
        }
    }

    router
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
