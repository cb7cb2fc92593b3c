//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use chrono::{Duration, Utc};
use serde_json::Value;
use tower::ServiceExt;

use zabaan_api::AppState;
use zabaan_auth::TokenCodec;
use zabaan_core::config::AppConfig;
use zabaan_core::types::UserId;
use zabaan_database::MemoryUserStore;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store, for direct inspection
    pub store: MemoryUserStore,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a test application with a generous rate limit.
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.rate_limit.max_requests = 1_000;
        Self::with_config(config)
    }

    /// Create a test application from an explicit configuration.
    pub fn with_config(config: AppConfig) -> Self {
        let store = MemoryUserStore::new();
        let state = AppState::new(
            config.clone(),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
        )
        .expect("Failed to build app state");

        Self {
            router: zabaan_api::build_router(state),
            store,
            config,
        }
    }

    /// Sign up a user and return the response.
    pub async fn signup(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/signup",
            Some(serde_json::json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": email,
                "password": password,
            })),
            None,
        )
        .await
    }

    /// Sign up a user and return their id and token.
    pub async fn create_test_user(&self, email: &str, password: &str) -> (i64, String) {
        let response = self.signup(email, password).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Signup failed: {:?}",
            response.body
        );
        let id = response.body["user"]["id"]
            .as_i64()
            .expect("No user id in signup response");
        let token = response.body["token"]
            .as_str()
            .expect("No token in signup response")
            .to_string();
        (id, token)
    }

    /// Sign a token directly with the app secret, stamped `age` in the past.
    pub fn token_issued_ago(&self, user_id: i64, email: &str, age: Duration) -> String {
        TokenCodec::from_config(&self.config.auth)
            .issue(
                UserId(user_id),
                email,
                Utc::now() - age,
                self.config.auth.token_ttl().expect("Invalid token ttl"),
            )
            .expect("Failed to sign token")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a prebuilt request.
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Test response wrapper
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body as JSON
    pub body: Value,
}

impl TestResponse {
    /// The `message` field of an error body.
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }

    /// The `Authorization` response header.
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
    }
}
