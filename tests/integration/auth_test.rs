//! Signup, login and getToken over HTTP.

use axum::http::StatusCode;
use chrono::Duration;

use crate::helpers::TestApp;

fn credentials(email: &str, password: &str) -> Option<serde_json::Value> {
    Some(serde_json::json!({ "email": email, "password": password }))
}

#[tokio::test]
async fn test_signup_returns_user_token_and_header() {
    let app = TestApp::new();

    let response = app.signup("Ada@Example.com", "secret123").await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["user"]["email"], "ada@example.com");
    assert_eq!(response.body["user"]["username"], "ada@example.com");
    assert!(response.body["user"].get("password_hash").is_none());

    let token = response.body["token"].as_str().unwrap();
    assert_eq!(
        response.authorization(),
        Some(format!("Bearer {token}").as_str())
    );
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts() {
    let app = TestApp::new();
    app.create_test_user("ada@example.com", "secret123").await;

    let response = app.signup("ADA@example.com", "another123").await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.message(), "email already exists");
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn test_signup_validation_messages() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/signup",
            Some(serde_json::json!({ "email": "ada@example.com", "password": "secret123" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.message(),
        "first_name, last_name, email and password required"
    );

    let response = app.signup("not-an-email", "secret123").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "invalid email format");

    let response = app.signup("ada@example.com", "short").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_signup_malformed_json_is_bad_request() {
    let app = TestApp::new();
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/signup")
        .header("Content-Type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "invalid JSON");
}

#[tokio::test]
async fn test_signup_ignores_bearer_header() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/signup",
            Some(serde_json::json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com",
                "password": "secret123",
            })),
            Some("garbage"),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_login_success_and_wrong_password() {
    let app = TestApp::new();
    let (id, _) = app.create_test_user("ada@example.com", "secret123").await;

    let response = app
        .request("POST", "/login", credentials(" ADA@example.com ", "secret123"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["id"], id);
    assert!(response.authorization().is_some());

    let response = app
        .request("POST", "/login", credentials("ada@example.com", "wrong123"), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "invalid email or password");

    let response = app
        .request("POST", "/login", credentials("nobody@example.com", "secret123"), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "invalid email or password");
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({ "email": "ada@example.com" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "email and password required");
}

#[tokio::test]
async fn test_login_with_invalid_bearer_is_rejected_before_credentials() {
    let app = TestApp::new();
    app.create_test_user("ada@example.com", "secret123").await;

    let response = app
        .request(
            "POST",
            "/login",
            credentials("ada@example.com", "secret123"),
            Some("not-a-token"),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "invalid or expired token");
}

fn raw_request(path: &str, bearer: &str, body: String) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri(path)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {bearer}"))
        .body(axum::body::Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_invalid_bearer_rejected_before_body_is_parsed() {
    let app = TestApp::new();

    for path in ["/login", "/getToken"] {
        let response = app
            .send(raw_request(path, "not-a-token", "{not json".to_string()))
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{path}");
        assert_eq!(response.message(), "invalid or expired token");
    }
}

#[tokio::test]
async fn test_invalid_bearer_rejected_before_body_limit() {
    let mut config = zabaan_core::config::AppConfig::default();
    config.server.max_body_bytes = 64;
    let app = TestApp::with_config(config);

    let body = serde_json::json!({ "email": "a".repeat(200), "password": "secret123" });
    let response = app
        .send(raw_request("/login", "not-a-token", body.to_string()))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_with_other_users_bearer_is_rejected() {
    let app = TestApp::new();
    app.create_test_user("ada@example.com", "secret123").await;
    let (_, grace_token) = app.create_test_user("grace@example.com", "secret456").await;

    let response = app
        .request(
            "POST",
            "/login",
            credentials("ada@example.com", "secret123"),
            Some(&grace_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "token does not belong to this user");
}

#[tokio::test]
async fn test_login_with_own_bearer_succeeds() {
    let app = TestApp::new();
    let (_, token) = app.create_test_user("ada@example.com", "secret123").await;

    let response = app
        .request(
            "POST",
            "/login",
            credentials("ada@example.com", "secret123"),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_get_token_revokes_earlier_tokens() {
    let app = TestApp::new();
    let (id, _) = app.create_test_user("ada@example.com", "secret123").await;
    let old_token = app.token_issued_ago(id, "ada@example.com", Duration::seconds(60));

    let response = app.request("GET", "/users", None, Some(&old_token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("POST", "/getToken", credentials("ada@example.com", "secret123"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let new_token = response.body["token"].as_str().unwrap().to_string();
    assert_eq!(
        response.authorization(),
        Some(format!("Bearer {new_token}").as_str())
    );
    assert!(response.body.get("user").is_none());

    let response = app.request("GET", "/users", None, Some(&old_token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "invalid or expired token");

    let response = app.request("GET", "/users", None, Some(&new_token)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_get_token_with_revoked_bearer_is_rejected() {
    let app = TestApp::new();
    let (id, _) = app.create_test_user("ada@example.com", "secret123").await;
    let old_token = app.token_issued_ago(id, "ada@example.com", Duration::seconds(60));

    let response = app
        .request("POST", "/getToken", credentials("ada@example.com", "secret123"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/getToken",
            credentials("ada@example.com", "secret123"),
            Some(&old_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_token_wrong_password_keeps_existing_tokens() {
    let app = TestApp::new();
    let (id, _) = app.create_test_user("ada@example.com", "secret123").await;
    let old_token = app.token_issued_ago(id, "ada@example.com", Duration::seconds(60));

    let response = app
        .request("POST", "/getToken", credentials("ada@example.com", "wrong123"), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.request("GET", "/users", None, Some(&old_token)).await;
    assert_eq!(response.status, StatusCode::OK);
}
