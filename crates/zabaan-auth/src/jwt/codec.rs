//! Stateless HS256 token signing and verification.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use zabaan_core::config::AuthConfig;
use zabaan_core::error::AppError;
use zabaan_core::types::UserId;

use super::claims::Claims;

/// Signs and parses bearer tokens with a shared HMAC secret.
///
/// Only HS256 is accepted on parse; a token whose header names any other
/// algorithm is rejected before its signature is looked at.
#[derive(Clone)]
pub struct TokenCodec {
    secret_configured: bool,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("secret_configured", &self.secret_configured)
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a codec for `secret` with `leeway_seconds` of clock skew on `exp`.
    pub fn new(secret: &str, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            secret_configured: !secret.is_empty(),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Creates a codec from auth configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, config.jwt_leeway_seconds)
    }

    /// Signs a token for `user_id` stamped with `issued_at`, expiring `ttl` later.
    pub fn issue(
        &self,
        user_id: UserId,
        email: &str,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, AppError> {
        self.ensure_secret()?;

        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::validation("token expiry is out of range"))?;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Token signing failed: {e}")))
    }

    /// Verifies signature, algorithm and expiry, and returns the claims.
    pub fn parse(&self, token: &str) -> Result<Claims, AppError> {
        self.ensure_secret()?;

        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::token_invalid("token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::token_invalid("invalid token signature")
                }
                jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => {
                    AppError::token_invalid("unexpected token algorithm")
                }
                _ => AppError::token_invalid(format!("malformed token: {e}")),
            })
    }

    fn ensure_secret(&self) -> Result<(), AppError> {
        if self.secret_configured {
            Ok(())
        } else {
            Err(AppError::configuration("JWT signing secret is not configured"))
        }
    }
}
