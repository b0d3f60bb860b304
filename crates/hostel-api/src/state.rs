//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use tracing::info;

use hostel_auth::password::{PasswordHasher, PasswordValidator};
use hostel_auth::{
    CredentialVerifier, JwtDecoder, JwtEncoder, RouteGate, RouteTable, SessionManager,
};
use hostel_core::config::{AppConfig, SessionConfig};
use hostel_core::error::AppError;
use hostel_database::{AccountStore, DatabasePool};
use hostel_service::{AccountFactory, AccountService, AdminAccountService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool, absent when running on the in-memory store
    pub db_pool: Option<DatabasePool>,
    /// Account store
    pub store: Arc<dyn AccountStore>,

    // ── Auth ─────────────────────────────────────────────────
    /// Route gate with its verifier
    pub gate: Arc<RouteGate>,
    /// Login and token resolution
    pub sessions: Arc<SessionManager>,

    // ── Services ─────────────────────────────────────────────
    /// Account self-service
    pub account_service: Arc<AccountService>,
    /// Admin account management
    pub admin_service: Arc<AdminAccountService>,
}

impl AppState {
    /// Checks the parts of the configuration that need no I/O: the signing
    /// secret, the token lifetimes and the route table.
    ///
    /// Run before connecting to the database so a bad config fails fast.
    pub fn check_config(config: &AppConfig) -> Result<(), AppError> {
        JwtEncoder::new(&config.auth, &config.session)?;
        RouteTable::new(&config.gate.rules)?;
        Ok(())
    }

    /// Wires every component from configuration.
    ///
    /// Fails with a `Configuration` error if the signing secret or the route
    /// table is unusable; callers treat that as fatal.
    pub fn build(
        config: AppConfig,
        store: Arc<dyn AccountStore>,
        db_pool: Option<DatabasePool>,
    ) -> Result<Self, AppError> {
        let encoder = Arc::new(JwtEncoder::new(&config.auth, &config.session)?);
        let decoder = JwtDecoder::new(&config.auth)?;
        let gate = Arc::new(RouteGate::new(&config.gate, decoder.clone())?);

        info!(rules = gate.table().rules().len(), "Route gate initialized");

        let sessions = Arc::new(SessionManager::new(
            Arc::clone(&store),
            CredentialVerifier::new(Arc::clone(&store))?,
            encoder,
            Arc::new(decoder),
        ));

        let factory = AccountFactory::new(
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&config.auth)),
        );
        let account_service = Arc::new(AccountService::new(Arc::clone(&store), factory.clone()));
        let admin_service = Arc::new(AdminAccountService::new(Arc::clone(&store), factory));

        Ok(Self {
            config: Arc::new(config),
            db_pool,
            store,
            gate,
            sessions,
            account_service,
            admin_service,
        })
    }

    /// Session cookie settings.
    pub fn session_config(&self) -> &SessionConfig {
        &self.config.session
    }
}
