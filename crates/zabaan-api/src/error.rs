//! Maps domain `AppError` to HTTP responses through the [`ApiError`] wrapper.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use zabaan_core::error::{AppError, ErrorKind};

/// Message returned for every rejected bearer token.
pub const INVALID_TOKEN_MESSAGE: &str = "invalid or expired token";

const INTERNAL_MESSAGE: &str = "internal server error";

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP-facing wrapper around [`AppError`].
///
/// Handlers and extractors return this so that `?` on any `AppResult`
/// converts through `From`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Status code and public message for an error.
///
/// Server-side failures never expose their message.
pub fn status_and_message(err: &AppError) -> (StatusCode, &str) {
    match err.kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, err.message.as_str()),
        ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, err.message.as_str()),
        ErrorKind::TokenInvalid | ErrorKind::TokenRevoked => {
            (StatusCode::UNAUTHORIZED, INVALID_TOKEN_MESSAGE)
        }
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, err.message.as_str()),
        ErrorKind::Conflict => (StatusCode::CONFLICT, err.message.as_str()),
        ErrorKind::RateLimit => (StatusCode::TOO_MANY_REQUESTS, err.message.as_str()),
        ErrorKind::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, err.message.as_str()),
        ErrorKind::Configuration
        | ErrorKind::Database
        | ErrorKind::Serialization
        | ErrorKind::Internal => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, message) = status_and_message(&err);

        if status.is_server_error() {
            tracing::error!(
                kind = %err.kind,
                error = %err.message,
                source = ?std::error::Error::source(&err).map(ToString::to_string),
                "Request failed"
            );
        }

        let body = ApiErrorResponse {
            error: err.kind.to_string(),
            message: message.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
