//! Health, info and fallbacks.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_without_database() {
    let app = TestApp::new();

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["message"], "Server is running");
    assert_eq!(response.body["database"], "not configured");
}

#[tokio::test]
async fn test_root_info() {
    let app = TestApp::new();

    let response = app.request("GET", "/", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Zabaan API");
    assert_eq!(response.body["health"], "/health");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new();

    let response = app.request("GET", "/nope", None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "not found");
    assert_eq!(response.body["path"], "/nope");
}

#[tokio::test]
async fn test_wrong_method_is_json_405() {
    let app = TestApp::new();

    let response = app.request("GET", "/signup", None, None).await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body["error"], "method not allowed");
}

#[tokio::test]
async fn test_oversized_body_is_413() {
    let mut config = zabaan_core::config::AppConfig::default();
    config.server.max_body_bytes = 64;
    let app = TestApp::with_config(config);

    let response = app
        .request(
            "POST",
            "/signup",
            Some(serde_json::json!({
                "first_name": "x".repeat(200),
                "last_name": "Lovelace",
                "email": "ada@example.com",
                "password": "secret123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.message(), "request body too large");
}
