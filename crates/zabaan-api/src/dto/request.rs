//! Request DTOs with validation.
//!
//! Missing fields deserialize as empty strings so that absent and blank
//! inputs are reported with the same message.

use serde::{Deserialize, Serialize};
use validator::Validate;

use zabaan_core::error::AppError;

/// `POST /signup` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SignupRequest {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl SignupRequest {
    /// Rejects the request when any field is empty.
    pub fn ensure_complete(&self) -> Result<(), AppError> {
        self.validate().map_err(|_| {
            AppError::validation("first_name, last_name, email and password required")
        })
    }
}

/// `POST /login` and `POST /getToken` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl LoginRequest {
    /// Rejects the request when email or password is empty.
    pub fn ensure_complete(&self) -> Result<(), AppError> {
        self.validate()
            .map_err(|_| AppError::validation("email and password required"))
    }
}
