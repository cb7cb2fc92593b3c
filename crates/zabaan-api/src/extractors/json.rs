//! JSON body extractor with `ApiError` rejections.

use axum::Json;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use serde::de::DeserializeOwned;

use zabaan_core::error::AppError;

use crate::error::ApiError;

/// Like [`Json`], but malformed bodies become a 400 `{"error", "message"}`
/// and oversized bodies a 413 instead of axum's plain-text rejections.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Err(AppError::payload_too_large("request body too large").into())
            }
            Err(_) => Err(AppError::validation("invalid JSON").into()),
        }
    }
}
