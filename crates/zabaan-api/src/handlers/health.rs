//! Health, info, and fallback handlers.

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use tracing::warn;

use crate::dto::response::{ApiInfoResponse, ErrorOnlyResponse, HealthResponse, NotFoundResponse};
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = if !state.database_configured {
        "not configured"
    } else {
        match state.users.health_check().await {
            Ok(true) => "connected",
            Ok(false) => "disconnected",
            Err(e) => {
                warn!(error = %e, "Database health check failed");
                "disconnected"
            }
        }
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Server is running".to_string(),
        database: database.to_string(),
    })
}

/// GET /
pub async fn root() -> Json<ApiInfoResponse> {
    Json(ApiInfoResponse {
        message: "Zabaan API".to_string(),
        health: "/health".to_string(),
    })
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            error: "not found".to_string(),
            path: uri.path().to_string(),
        }),
    )
}

/// Fallback for known routes hit with the wrong method.
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorOnlyResponse {
            error: "method not allowed".to_string(),
        }),
    )
}
