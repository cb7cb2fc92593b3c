//! In-process user store.
//!
//! Used when no database URL is configured and throughout the test
//! suites. Users live in a [`DashMap`] keyed by id, with a second map
//! from email to id acting as the unique index. Revocation writes take the
//! per-entry write guard, so writes for one user are linearized while
//! other users proceed in parallel.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use zabaan_core::error::AppError;
use zabaan_core::result::AppResult;
use zabaan_core::traits::{RevocationStore, UserStore};
use zabaan_core::types::{NewUser, User, UserCredentials, UserId};

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
    token_valid_after: Option<DateTime<Utc>>,
}

/// Thread-safe in-memory implementation of [`UserStore`] and
/// [`RevocationStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<DashMap<UserId, StoredUser>>,
    emails: Arc<DashMap<String, UserId>>,
    next_id: Arc<AtomicI64>,
}

impl MemoryUserStore {
    /// Create an empty store. Ids start at 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the store holds no users.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserCredentials>> {
        let Some(id) = self.emails.get(email).map(|e| *e.value()) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|stored| UserCredentials {
            user: stored.user.clone(),
            password_hash: stored.password_hash.clone(),
        }))
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|stored| stored.user.clone()))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|e| e.user.clone()).collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn create_with_password(&self, new_user: NewUser) -> AppResult<User> {
        // The email entry guard is held until the user row is inserted.
        match self.emails.entry(new_user.email.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("email already exists")),
            Entry::Vacant(slot) => {
                if self
                    .users
                    .iter()
                    .any(|e| e.user.username == new_user.username)
                {
                    return Err(AppError::conflict("email already exists"));
                }

                let id = UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
                let now = Utc::now();
                let user = User {
                    id,
                    email: new_user.email,
                    username: new_user.username,
                    first_name: new_user.first_name,
                    last_name: new_user.last_name,
                    created_at: now,
                    updated_at: now,
                };
                self.users.insert(
                    id,
                    StoredUser {
                        user: user.clone(),
                        password_hash: new_user.password_hash,
                        token_valid_after: None,
                    },
                );
                slot.insert(id);
                debug!(user_id = %id, "User stored in memory");
                Ok(user)
            }
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[async_trait]
impl RevocationStore for MemoryUserStore {
    async fn token_valid_after(&self, user_id: UserId) -> AppResult<Option<DateTime<Utc>>> {
        self.users
            .get(&user_id)
            .map(|stored| stored.token_valid_after)
            .ok_or_else(|| AppError::not_found(format!("user {user_id} not found")))
    }

    async fn set_token_valid_after(&self, user_id: UserId, at: DateTime<Utc>) -> AppResult<()> {
        let mut stored = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::not_found(format!("user {user_id} not found")))?;
        stored.token_valid_after = Some(at);
        Ok(())
    }
}
