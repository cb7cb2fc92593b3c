//! Token issuance and validation against the per-user revocation mark.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error};

use zabaan_core::config::AuthConfig;
use zabaan_core::error::{AppError, ErrorKind};
use zabaan_core::result::AppResult;
use zabaan_core::traits::RevocationStore;
use zabaan_core::types::UserId;

use super::revocation::is_revoked;
use crate::jwt::{Claims, TokenCodec};

/// Token operations the HTTP layer depends on.
#[async_trait]
pub trait TokenLifecycle: Send + Sync + 'static {
    /// Issue a token stamped with the current time.
    fn issue_token(&self, user_id: UserId, email: &str) -> AppResult<String>;

    /// Issue a token stamped with `issued_at`.
    fn issue_token_at(
        &self,
        user_id: UserId,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> AppResult<String>;

    /// Invalidate every token for `user_id` issued before `at`.
    async fn revoke_all_before(&self, user_id: UserId, at: DateTime<Utc>) -> AppResult<()>;

    /// Parse the token and reject it if it has been revoked.
    async fn validate_and_check_revocation(&self, token: &str) -> AppResult<Claims>;
}

/// [`TokenLifecycle`] over a [`TokenCodec`] and a [`RevocationStore`].
///
/// Validity is recomputed on every call. Nothing is cached, so a
/// revocation is visible to the very next validation.
#[derive(Clone)]
pub struct TokenLifecycleService {
    codec: TokenCodec,
    store: Arc<dyn RevocationStore>,
    ttl: Duration,
    tolerance: Duration,
}

impl std::fmt::Debug for TokenLifecycleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenLifecycleService")
            .field("codec", &self.codec)
            .field("ttl", &self.ttl)
            .field("tolerance", &self.tolerance)
            .finish()
    }
}

impl TokenLifecycleService {
    /// Creates a service from auth configuration.
    ///
    /// Fails with `Configuration` when the lifetime or tolerance is out of
    /// bounds.
    pub fn new(config: &AuthConfig, store: Arc<dyn RevocationStore>) -> AppResult<Self> {
        Ok(Self {
            codec: TokenCodec::from_config(config),
            store,
            ttl: config.token_ttl()?,
            tolerance: config.revocation_tolerance()?,
        })
    }
}

#[async_trait]
impl TokenLifecycle for TokenLifecycleService {
    fn issue_token(&self, user_id: UserId, email: &str) -> AppResult<String> {
        self.issue_token_at(user_id, email, Utc::now())
    }

    fn issue_token_at(
        &self,
        user_id: UserId,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> AppResult<String> {
        self.codec.issue(user_id, email, issued_at, self.ttl)
    }

    async fn revoke_all_before(&self, user_id: UserId, at: DateTime<Utc>) -> AppResult<()> {
        self.store
            .set_token_valid_after(user_id, at)
            .await
            .map_err(|e| match e.kind {
                ErrorKind::NotFound | ErrorKind::Database => e,
                _ => AppError::with_source(ErrorKind::Database, "Failed to store revocation", e),
            })?;

        debug!(user_id = %user_id, valid_after = %at, "Revoked earlier tokens");
        Ok(())
    }

    async fn validate_and_check_revocation(&self, token: &str) -> AppResult<Claims> {
        let claims = self.codec.parse(token)?;
        let user_id = claims.user_id()?;
        let issued_at = claims.issued_at()?;

        let valid_after = match self.store.token_valid_after(user_id).await {
            Ok(mark) => mark,
            Err(e) if e.kind == ErrorKind::NotFound => {
                debug!(user_id = %user_id, "Token subject no longer exists");
                return Err(AppError::token_invalid("token subject does not exist"));
            }
            Err(e) => {
                error!(user_id = %user_id, error = %e, "Revocation lookup failed");
                return Err(match e.kind {
                    ErrorKind::Database => e,
                    _ => AppError::with_source(
                        ErrorKind::Database,
                        "Failed to read revocation mark",
                        e,
                    ),
                });
            }
        };

        if let Some(valid_after) = valid_after {
            if is_revoked(issued_at, valid_after, self.tolerance) {
                debug!(user_id = %user_id, iat = claims.iat, "Rejected revoked token");
                return Err(AppError::token_revoked("token revoked"));
            }
        }

        Ok(claims)
    }
}
