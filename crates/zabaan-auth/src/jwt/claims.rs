//! JWT claims structure carried by every bearer token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use zabaan_core::error::AppError;
use zabaan_core::types::UserId;

/// JWT claims payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id as a decimal string.
    pub sub: String,
    /// Email of the user at issuance.
    pub email: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Parses the subject back into a [`UserId`].
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::token_invalid("token subject is not a user id"))
    }

    /// Returns the issued-at time.
    pub fn issued_at(&self) -> Result<DateTime<Utc>, AppError> {
        DateTime::from_timestamp(self.iat, 0)
            .ok_or_else(|| AppError::token_invalid("token iat is out of range"))
    }
}
