//! Typed path parameter helpers.

use zabaan_core::error::AppError;
use zabaan_core::types::UserId;

/// Parses a user id from a path segment. A segment that is not a plain
/// decimal id does not name a resource and is a plain "not found".
pub fn parse_user_id(s: &str) -> Result<UserId, AppError> {
    s.parse().map_err(|_| AppError::not_found("not found"))
}
