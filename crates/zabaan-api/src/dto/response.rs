//! Response DTOs.

use serde::{Deserialize, Serialize};

use zabaan_core::types::User;

/// Body returned by `/signup` and `/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// Body returned by `/getToken`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Body returned by `/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process serves requests.
    pub status: String,
    pub message: String,
    /// `"connected"`, `"disconnected"`, or `"not configured"`.
    pub database: String,
}

/// Body returned by `/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiInfoResponse {
    pub message: String,
    pub health: String,
}

/// Body returned for unknown routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotFoundResponse {
    pub error: String,
    pub path: String,
}

/// Body returned when a route exists but not for the request method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOnlyResponse {
    pub error: String,
}
