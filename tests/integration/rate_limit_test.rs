//! Credential endpoint throttling.

use axum::http::StatusCode;

use zabaan_core::config::AppConfig;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_eleventh_credential_request_is_throttled() {
    let app = TestApp::with_config(AppConfig::default());
    let body = serde_json::json!({ "email": "ada@example.com", "password": "secret123" });

    for _ in 0..10 {
        let response = app.request("POST", "/login", Some(body.clone()), None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    let response = app.request("POST", "/getToken", Some(body), None).await;
    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.body["error"], "RATE_LIMIT");
}

#[tokio::test]
async fn test_throttling_spares_other_routes() {
    let app = TestApp::with_config(AppConfig::default());
    let body = serde_json::json!({ "email": "ada@example.com", "password": "secret123" });

    for _ in 0..11 {
        app.request("POST", "/login", Some(body.clone()), None).await;
    }

    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
}
