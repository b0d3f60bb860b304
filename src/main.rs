//! Hostel platform server.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use hostel_api::AppState;
use hostel_core::config::AppConfig;
use hostel_core::error::AppError;
use hostel_database::{AccountRepository, AccountStore, DatabasePool, MemoryAccountStore};

#[tokio::main]
async fn main() {
    let memory = std::env::args().skip(1).any(|arg| arg == "--memory");

    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config, memory).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from file and environment, then run the startup checks
fn load_configuration() -> Result<AppConfig, AppError> {
    let dir = std::env::var("HOSTEL_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("HOSTEL_ENV").unwrap_or_else(|_| "development".to_string());

    let config = AppConfig::load_from(&dir, &env)?;
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
async fn run(config: AppConfig, memory: bool) -> Result<(), AppError> {
    tracing::info!("Starting hostel platform v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 0: Fail fast on a bad secret or route table ─────────
    AppState::check_config(&config)?;

    // ── Step 1: Account store ────────────────────────────────────
    let (db_pool, store): (Option<DatabasePool>, Arc<dyn AccountStore>) = if memory {
        tracing::warn!("Running on the in-memory account store; data is lost on exit");
        (None, Arc::new(MemoryAccountStore::new()))
    } else {
        let pool = DatabasePool::connect(&config.database).await?;
        hostel_database::migration::run_migrations(&pool).await?;
        let store = Arc::new(AccountRepository::new(&pool));
        (Some(pool), store)
    };

    // ── Step 2: Auth, gate and services ──────────────────────────
    let state = AppState::build(config, store, db_pool.clone())?;

    // ── Step 3: Serve until shutdown ─────────────────────────────
    let result = hostel_api::run_server(state).await;

    // ── Step 4: Release resources ────────────────────────────────
    if let Some(pool) = db_pool {
        pool.close().await;
    }

    tracing::info!("Hostel platform shut down");
    result
}
