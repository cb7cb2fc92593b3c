//! Bearer token extractors.
//!
//! [`AuthUser`] requires a valid, unrevoked bearer. [`CredentialBearer`]
//! accepts a missing bearer but rejects one that does not verify. Both run
//! on request parts, so they reject before any body is read.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::{error, info};

use zabaan_auth::Claims;
use zabaan_core::error::AppError;
use zabaan_core::types::UserId;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller, resolved from `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Id from the token subject.
    pub user_id: UserId,
    /// Verified claims.
    pub claims: Claims,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            AppError::authentication("missing or invalid Authorization header")
        })?;

        let claims = verify_bearer(state, token, "require_auth").await?;
        let user_id = claims.user_id()?;

        Ok(AuthUser { user_id, claims })
    }
}

/// Verified claims of an optional bearer on the credential routes.
///
/// `None` when no bearer was sent. A bearer that is present must validate,
/// including the revocation check, or the request is rejected with 401.
#[derive(Debug, Clone, Default)]
pub struct CredentialBearer(pub Option<Claims>);

impl FromRequestParts<AppState> for CredentialBearer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Ok(CredentialBearer(None));
        };

        let claims = verify_bearer(state, token, "credentials").await?;
        Ok(CredentialBearer(Some(claims)))
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Validates a bearer token including the revocation check.
///
/// Token rejections are logged at info. A store failure is logged at
/// error and still rejected as unauthenticated.
async fn verify_bearer(
    state: &AppState,
    token: &str,
    component: &'static str,
) -> Result<Claims, AppError> {
    match state.tokens.validate_and_check_revocation(token).await {
        Ok(claims) => Ok(claims),
        Err(e) if e.is_token_rejection() => {
            info!(component, reason = %e.kind, error = %e.message, "Auth rejected");
            Err(e)
        }
        Err(e) => {
            error!(component, error = %e, "Auth validation failed");
            Err(AppError::token_invalid("token could not be verified"))
        }
    }
}
