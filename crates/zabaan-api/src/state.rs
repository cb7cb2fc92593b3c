//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use zabaan_auth::{AccountManager, Argon2Hasher, TokenLifecycle, TokenLifecycleService};
use zabaan_core::config::AppConfig;
use zabaan_core::result::AppResult;
use zabaan_core::traits::{RevocationStore, UserStore};

use crate::middleware::rate_limit::{ClientKeyResolver, SlidingWindowRateLimiter};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped or `Copy` for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Whether a database URL was configured (reported by `/health`)
    pub database_configured: bool,

    // ── Storage ──────────────────────────────────────────────
    /// User lookup (PostgreSQL or in-memory)
    pub users: Arc<dyn UserStore>,

    // ── Auth ─────────────────────────────────────────────────
    /// Sign-up and credential login
    pub accounts: Arc<AccountManager>,
    /// Token issuance, validation and revocation
    pub tokens: Arc<dyn TokenLifecycle>,

    // ── Throttling ───────────────────────────────────────────
    /// Credential endpoint limiter
    pub rate_limiter: Arc<SlidingWindowRateLimiter>,
    /// Rate-limit key derivation
    pub client_keys: ClientKeyResolver,
}

impl AppState {
    /// Wires the services over the given stores.
    ///
    /// `users` and `revocations` are usually the same object seen through
    /// two capability traits. Fails with `Configuration` when token
    /// durations are out of bounds.
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        revocations: Arc<dyn RevocationStore>,
    ) -> AppResult<Self> {
        let accounts = AccountManager::new(&config.auth, users.clone(), Arc::new(Argon2Hasher::new()));
        let tokens = TokenLifecycleService::new(&config.auth, revocations)?;

        Ok(Self {
            database_configured: config.database.is_configured(),
            users,
            accounts: Arc::new(accounts),
            tokens: Arc::new(tokens),
            rate_limiter: Arc::new(SlidingWindowRateLimiter::from_config(&config.rate_limit)),
            client_keys: ClientKeyResolver::new(config.rate_limit.trust_proxy),
            config: Arc::new(config),
        })
    }

    /// Replaces the token lifecycle, e.g. with a test double.
    pub fn with_tokens(mut self, tokens: Arc<dyn TokenLifecycle>) -> Self {
        self.tokens = tokens;
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("database_configured", &self.database_configured)
            .field("accounts", &self.accounts)
            .field("rate_limiter", &self.rate_limiter)
            .field("client_keys", &self.client_keys)
            .finish()
    }
}
