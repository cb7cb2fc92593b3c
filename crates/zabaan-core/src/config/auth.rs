//! Authentication configuration.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Placeholder signing secret. Accepted in development, rejected in
/// production by [`AppConfig::validate`](super::AppConfig::validate).
pub const DEFAULT_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Longest accepted token lifetime: one year.
pub const MAX_JWT_TTL_MINUTES: u64 = 366 * 24 * 60;

/// Largest accepted revocation tolerance: one hour.
pub const MAX_REVOCATION_TOLERANCE_SECONDS: u64 = 60 * 60;

/// Token and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Token lifetime in minutes.
    #[serde(default = "default_ttl")]
    pub jwt_ttl_minutes: u64,
    /// Clock skew allowed when checking `exp`.
    #[serde(default)]
    pub jwt_leeway_seconds: u64,
    /// Tokens whose `iat` lies within this many seconds before the
    /// revocation mark are still accepted.
    #[serde(default = "default_tolerance")]
    pub revocation_tolerance_seconds: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Maximum password length in bytes.
    #[serde(default = "default_password_max")]
    pub password_max_length: usize,
    /// Maximum email length.
    #[serde(default = "default_email_max")]
    pub email_max_length: usize,
    /// Maximum length for first and last names.
    #[serde(default = "default_name_max")]
    pub name_max_length: usize,
}

impl AuthConfig {
    /// Token lifetime, bounded by [`MAX_JWT_TTL_MINUTES`].
    pub fn token_ttl(&self) -> AppResult<TimeDelta> {
        if self.jwt_ttl_minutes == 0 || self.jwt_ttl_minutes > MAX_JWT_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "auth.jwt_ttl_minutes must be between 1 and {MAX_JWT_TTL_MINUTES}"
            )));
        }
        i64::try_from(self.jwt_ttl_minutes)
            .ok()
            .and_then(TimeDelta::try_minutes)
            .ok_or_else(|| AppError::configuration("auth.jwt_ttl_minutes is out of range"))
    }

    /// Revocation tolerance, bounded by [`MAX_REVOCATION_TOLERANCE_SECONDS`].
    pub fn revocation_tolerance(&self) -> AppResult<TimeDelta> {
        if self.revocation_tolerance_seconds > MAX_REVOCATION_TOLERANCE_SECONDS {
            return Err(AppError::configuration(format!(
                "auth.revocation_tolerance_seconds must be at most {MAX_REVOCATION_TOLERANCE_SECONDS}"
            )));
        }
        i64::try_from(self.revocation_tolerance_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .ok_or_else(|| {
                AppError::configuration("auth.revocation_tolerance_seconds is out of range")
            })
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_ttl_minutes: default_ttl(),
            jwt_leeway_seconds: 0,
            revocation_tolerance_seconds: default_tolerance(),
            password_min_length: default_password_min(),
            password_max_length: default_password_max(),
            email_max_length: default_email_max(),
            name_max_length: default_name_max(),
        }
    }
}

fn default_jwt_secret() -> String {
    DEFAULT_JWT_SECRET.to_string()
}

fn default_ttl() -> u64 {
    24 * 60
}

fn default_tolerance() -> u64 {
    2
}

fn default_password_min() -> usize {
    8
}

fn default_password_max() -> usize {
    72
}

fn default_email_max() -> usize {
    255
}

fn default_name_max() -> usize {
    100
}
