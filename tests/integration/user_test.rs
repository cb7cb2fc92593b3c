//! Authenticated user reads.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_users_require_bearer() {
    let app = TestApp::new();

    let response = app.request("GET", "/users", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "missing or invalid Authorization header");

    let response = app.request("GET", "/users", None, Some("garbage")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "invalid or expired token");
}

#[tokio::test]
async fn test_list_users_ordered_by_id() {
    let app = TestApp::new();
    let (_, token) = app.create_test_user("ada@example.com", "secret123").await;
    app.create_test_user("grace@example.com", "secret456").await;

    let response = app.request("GET", "/users", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let users = response.body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["email"], "ada@example.com");
    assert_eq!(users[1]["email"], "grace@example.com");
}

#[tokio::test]
async fn test_get_user_by_id() {
    let app = TestApp::new();
    let (id, token) = app.create_test_user("ada@example.com", "secret123").await;

    let response = app
        .request("GET", &format!("/users/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], id);

    let response = app.request("GET", "/users/999", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "user not found");

    let response = app.request("GET", "/users/abc", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "not found");
}
