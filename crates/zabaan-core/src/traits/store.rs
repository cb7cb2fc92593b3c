//! Persistence capabilities consumed by the auth core.
//!
//! Two implementations exist: the PostgreSQL repository and the in-memory
//! store. Both live in `zabaan-database`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::result::AppResult;
use crate::types::id::UserId;
use crate::types::user::{NewUser, User, UserCredentials};

/// User lookup and creation.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user and their password hash by (already normalized) email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserCredentials>>;

    /// Find a user by id.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// All users ordered by id.
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Insert a user with a password hash.
    ///
    /// Fails with `Conflict` when the email (or username) is taken.
    async fn create_with_password(&self, new_user: NewUser) -> AppResult<User>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// Per-user revocation mark (`token_valid_after`).
///
/// Writes for one user must be linearized; writes for different users
/// must not block each other.
#[async_trait]
pub trait RevocationStore: Send + Sync + 'static {
    /// Current mark for the user. `Ok(None)` means no revocation has ever
    /// happened. Fails with `NotFound` when the user does not exist.
    async fn token_valid_after(&self, user_id: UserId) -> AppResult<Option<DateTime<Utc>>>;

    /// Set the mark to `at` under a serialized read-modify-write.
    ///
    /// Fails with `NotFound` when the user does not exist.
    async fn set_token_valid_after(&self, user_id: UserId, at: DateTime<Utc>) -> AppResult<()>;
}
