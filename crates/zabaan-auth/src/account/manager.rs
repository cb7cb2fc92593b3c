//! Account sign-up and credential login.

use std::sync::Arc;

use tracing::{info, warn};

use zabaan_core::config::AuthConfig;
use zabaan_core::error::AppError;
use zabaan_core::result::AppResult;
use zabaan_core::traits::{CredentialHasher, UserStore};
use zabaan_core::types::{NewUser, User};

use crate::password::{PasswordPolicy, normalize_email};

const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Fields submitted at sign-up.
#[derive(Debug, Clone)]
pub struct SignUp {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Creates accounts and checks credentials.
#[derive(Clone)]
pub struct AccountManager {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn CredentialHasher>,
    policy: PasswordPolicy,
}

impl std::fmt::Debug for AccountManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountManager")
            .field("policy", &self.policy)
            .finish()
    }
}

impl AccountManager {
    /// Creates a new account manager.
    pub fn new(
        config: &AuthConfig,
        users: Arc<dyn UserStore>,
        hasher: Arc<dyn CredentialHasher>,
    ) -> Self {
        Self {
            users,
            hasher,
            policy: PasswordPolicy::new(config),
        }
    }

    /// Registers a user. The normalized email doubles as the username.
    pub async fn sign_up(&self, request: SignUp) -> AppResult<User> {
        let email = normalize_email(&request.email);
        self.policy.validate_email(&email)?;
        self.policy.validate_email_length(&email)?;
        self.policy.validate_name("first_name", &request.first_name)?;
        self.policy.validate_name("last_name", &request.last_name)?;
        self.policy.validate_password(&request.password)?;

        let hasher = Arc::clone(&self.hasher);
        let password = request.password;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {e}")))??;

        let user = self
            .users
            .create_with_password(NewUser {
                username: email.clone(),
                email,
                first_name: request.first_name,
                last_name: request.last_name,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User signed up");
        Ok(user)
    }

    /// Checks credentials and returns the matching user.
    ///
    /// Unknown email, an account without a password, and a wrong password
    /// all produce the same `Authentication` error.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        let email = normalize_email(email);
        self.policy.validate_email_length(&email)?;

        let Some(credentials) = self.users.find_by_email(&email).await? else {
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };
        if credentials.password_hash.is_empty() {
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        let hasher = Arc::clone(&self.hasher);
        let hash = credentials.password_hash;
        let password = password.to_string();
        let verified = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Verification task failed: {e}")))?;

        match verified {
            Ok(true) => Ok(credentials.user),
            Ok(false) => {
                warn!(user_id = %credentials.user.id, "Failed login attempt");
                Err(AppError::authentication(INVALID_CREDENTIALS))
            }
            Err(e) => {
                warn!(user_id = %credentials.user.id, error = %e, "Stored password hash is unreadable");
                Err(AppError::authentication(INVALID_CREDENTIALS))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zabaan_core::error::ErrorKind;
    use zabaan_database::MemoryUserStore;

    use crate::password::Argon2Hasher;

    fn manager() -> (AccountManager, MemoryUserStore) {
        let store = MemoryUserStore::new();
        let manager = AccountManager::new(
            &AuthConfig::default(),
            Arc::new(store.clone()),
            Arc::new(Argon2Hasher::new()),
        );
        (manager, store)
    }

    fn sign_up(email: &str, password: &str) -> SignUp {
        SignUp {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_normalizes_email_and_sets_username() {
        let (manager, _) = manager();
        let user = manager
            .sign_up(sign_up("  Ada@Example.com ", "secret123"))
            .await
            .unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.username, "ada@example.com");
        assert_eq!(user.first_name, "Ada");
    }

    #[tokio::test]
    async fn test_sign_up_stores_hash_not_password() {
        let (manager, store) = manager();
        manager
            .sign_up(sign_up("ada@example.com", "secret123"))
            .await
            .unwrap();
        let creds = store.find_by_email("ada@example.com").await.unwrap().unwrap();
        assert_ne!(creds.password_hash, "secret123");
        assert!(creds.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_sign_up_rejections() {
        let (manager, _) = manager();

        let err = manager.sign_up(sign_up("nope", "secret123")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "invalid email format");

        let err = manager
            .sign_up(sign_up("ada@example.com", "short1"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let mut long_name = sign_up("ada@example.com", "secret123");
        long_name.first_name = "x".repeat(101);
        let err = manager.sign_up(long_name).await.unwrap_err();
        assert_eq!(err.message, "first_name too long");
    }

    #[tokio::test]
    async fn test_duplicate_sign_up_conflicts() {
        let (manager, _) = manager();
        manager
            .sign_up(sign_up("ada@example.com", "secret123"))
            .await
            .unwrap();
        let err = manager
            .sign_up(sign_up("ADA@example.com", "secret456"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message, "email already exists");
    }

    #[tokio::test]
    async fn test_login_success_and_failures() {
        let (manager, _) = manager();
        let created = manager
            .sign_up(sign_up("ada@example.com", "secret123"))
            .await
            .unwrap();

        let user = manager.login(" ADA@example.com", "secret123").await.unwrap();
        assert_eq!(user.id, created.id);

        let err = manager.login("ada@example.com", "wrong123").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, "invalid email or password");

        let err = manager.login("nobody@example.com", "secret123").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_login_overlong_email_is_validation_error() {
        let (manager, _) = manager();
        let email = format!("{}@example.com", "a".repeat(300));
        let err = manager.login(&email, "secret123").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "email too long");
    }

    #[tokio::test]
    async fn test_login_without_password_hash_fails() {
        let (manager, store) = manager();
        store
            .create_with_password(NewUser {
                email: "legacy@example.com".to_string(),
                username: "legacy@example.com".to_string(),
                first_name: String::new(),
                last_name: String::new(),
                password_hash: String::new(),
            })
            .await
            .unwrap();
        let err = manager.login("legacy@example.com", "").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
