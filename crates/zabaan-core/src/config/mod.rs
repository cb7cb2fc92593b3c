//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! an optional TOML file pair and `ZABAAN__`-prefixed environment
//! variables. Each sub-module represents a logical configuration section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod rate_limit;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::auth::AuthConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::rate_limit::RateLimitConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged configuration
/// (default file + environment overlay + environment variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Deployment environment: `"development"` or `"production"`.
    #[serde(default = "default_environment")]
    pub environment: String,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token and password settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Credential endpoint throttling.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and the environment.
    ///
    /// Merges `config/default`, then `config/{env}`, then environment
    /// variables of the form `ZABAAN__AUTH__JWT_SECRET`. `environment`
    /// defaults to `env` unless a source sets it.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .set_default("environment", env)
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("ZABAAN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Whether this configuration targets production.
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Reject configurations that are unsafe to start with.
    ///
    /// An empty signing secret is always fatal, as are token durations
    /// outside their bounds. In production the secret
    /// must also differ from the built-in default and a database URL is
    /// required.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        self.auth.token_ttl()?;
        self.auth.revocation_tolerance()?;
        if self.rate_limit.max_requests == 0 {
            return Err(AppError::configuration(
                "rate_limit.max_requests must be at least 1",
            ));
        }
        if !self.is_production() {
            return Ok(());
        }
        if self.auth.jwt_secret == auth::DEFAULT_JWT_SECRET {
            return Err(AppError::configuration(
                "production requires auth.jwt_secret to be set and not the default value",
            ));
        }
        if self.database.url.is_empty() {
            return Err(AppError::configuration(
                "production requires database.url to be set",
            ));
        }
        Ok(())
    }
}

fn default_environment() -> String {
    "development".to_string()
}
