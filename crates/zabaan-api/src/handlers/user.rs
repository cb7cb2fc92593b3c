//! User read endpoints. Both require a valid bearer.

use axum::Json;
use axum::extract::{Path, State};

use zabaan_core::error::AppError;
use zabaan_core::types::User;

use crate::error::ApiError;
use crate::extractors::{AuthUser, parse_user_id};
use crate::state::AppState;

/// GET /users
pub async fn list_users(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.users.list().await?))
}

/// GET /users/{id}
pub async fn get_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = parse_user_id(&id)?;

    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("user not found"))?;

    Ok(Json(user))
}
