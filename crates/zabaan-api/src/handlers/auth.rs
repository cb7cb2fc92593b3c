//! Credential handlers: signup, login, getToken.
//!
//! Successful calls return the token in the body and echo it in an
//! `Authorization: Bearer` response header.

use axum::Json;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use tracing::{error, info};

use zabaan_auth::{Claims, SignUp};
use zabaan_core::error::AppError;
use zabaan_core::types::User;

use crate::dto::request::{LoginRequest, SignupRequest};
use crate::dto::response::{AuthResponse, TokenResponse};
use crate::error::ApiError;
use crate::extractors::{CredentialBearer, JsonBody};
use crate::state::AppState;

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SignupRequest>,
) -> Result<Response, ApiError> {
    req.ensure_complete()?;

    let user = state
        .accounts
        .sign_up(SignUp {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
        })
        .await?;

    let token = state.tokens.issue_token(user.id, &user.email).map_err(|e| {
        error!(handler = "signup", user_id = %user.id, error = %e, "Token issuance failed");
        e
    })?;

    let header = bearer_header(&token)?;
    Ok((
        StatusCode::CREATED,
        [(AUTHORIZATION, header)],
        Json(AuthResponse { user, token }),
    )
        .into_response())
}

/// POST /login
///
/// A bearer is optional. If sent it is verified before the body is read
/// and must belong to the same user as the credentials.
pub async fn login(
    State(state): State<AppState>,
    CredentialBearer(bearer): CredentialBearer,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Response, ApiError> {
    let user = authenticate_with_credentials(&state, bearer, &req).await?;

    let token = state.tokens.issue_token(user.id, &user.email).map_err(|e| {
        error!(handler = "login", user_id = %user.id, error = %e, "Token issuance failed");
        e
    })?;

    info!(user_id = %user.id, "User logged in");
    let header = bearer_header(&token)?;
    Ok(([(AUTHORIZATION, header)], Json(AuthResponse { user, token })).into_response())
}

/// POST /getToken
///
/// Exchanges credentials for a new token and revokes every token issued
/// to the user before it.
pub async fn get_token(
    State(state): State<AppState>,
    CredentialBearer(bearer): CredentialBearer,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Response, ApiError> {
    let user = authenticate_with_credentials(&state, bearer, &req).await?;

    // The new token is stamped with the revocation instant so it survives it.
    let issued_at = Utc::now();
    state
        .tokens
        .revoke_all_before(user.id, issued_at)
        .await
        .map_err(|e| {
            error!(handler = "get_token", user_id = %user.id, error = %e, "Revoking previous tokens failed");
            e
        })?;

    let token = state
        .tokens
        .issue_token_at(user.id, &user.email, issued_at)
        .map_err(|e| {
            error!(handler = "get_token", user_id = %user.id, error = %e, "Token issuance failed");
            e
        })?;

    info!(user_id = %user.id, "Issued fresh token and revoked earlier ones");
    let header = bearer_header(&token)?;
    Ok(([(AUTHORIZATION, header)], Json(TokenResponse { token })).into_response())
}

/// Checks credentials and, when a verified bearer came with them, that it
/// names the same user.
async fn authenticate_with_credentials(
    state: &AppState,
    bearer_claims: Option<Claims>,
    req: &LoginRequest,
) -> Result<User, AppError> {
    req.ensure_complete()?;
    let user = state.accounts.login(&req.email, &req.password).await?;

    if let Some(claims) = bearer_claims {
        if claims.sub != user.id.to_string() {
            return Err(AppError::authentication("token does not belong to this user"));
        }
    }

    Ok(user)
}

fn bearer_header(token: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| AppError::internal(format!("Token is not a valid header value: {e}")))
}
