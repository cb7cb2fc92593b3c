//! Zabaan Server
//!
//! Main entry point that wires the crates together and starts the server.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use zabaan_api::AppState;
use zabaan_core::config::AppConfig;
use zabaan_core::error::AppError;
use zabaan_core::traits::{RevocationStore, UserStore};
use zabaan_database::{DatabasePool, MemoryUserStore, UserRepository};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load and validate configuration for `ZABAAN_ENV` (default `development`).
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("ZABAAN_ENV").unwrap_or_else(|_| "development".to_string());

    let config = AppConfig::load(&env)?;
    config.validate()?;
    Ok(config)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        "Starting Zabaan"
    );

    let (users, revocations, db_pool) = open_stores(&config).await?;

    let addr = config.server.bind_address();
    let app = zabaan_api::build_router(AppState::new(config, users, revocations)?);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(%addr, "Zabaan server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    })
    .await
    .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(pool) = db_pool {
        pool.close().await;
    }

    tracing::info!("Zabaan server shut down gracefully");
    Ok(())
}

type Stores = (
    Arc<dyn UserStore>,
    Arc<dyn RevocationStore>,
    Option<DatabasePool>,
);

/// PostgreSQL when a URL is configured, otherwise the in-process store.
async fn open_stores(config: &AppConfig) -> Result<Stores, AppError> {
    if !config.database.is_configured() {
        tracing::warn!("database.url is not set; users are kept in memory and lost on restart");
        let store = MemoryUserStore::new();
        let users: Arc<dyn UserStore> = Arc::new(store.clone());
        let revocations: Arc<dyn RevocationStore> = Arc::new(store);
        return Ok((users, revocations, None));
    }

    let db_pool = DatabasePool::connect(&config.database).await?;
    if config.database.run_migrations {
        zabaan_database::migration::run_migrations(db_pool.pool()).await?;
    }

    let repo = UserRepository::new(db_pool.pool().clone());
    let users: Arc<dyn UserStore> = Arc::new(repo.clone());
    let revocations: Arc<dyn RevocationStore> = Arc::new(repo);
    Ok((users, revocations, Some(db_pool)))
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
