//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod gate;
pub mod logging;
pub mod session;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::{AuthConfig, MIN_SECRET_LENGTH};
pub use self::database::DatabaseConfig;
pub use self::gate::{GateConfig, RoleRoutes, RouteAccess, RouteRule};
pub use self::logging::LoggingConfig;
pub use self::session::SessionConfig;

use crate::error::AppError;

/// Prefix for environment variable overrides (`HOSTEL__AUTH__JWT_SECRET`).
pub const ENV_PREFIX: &str = "HOSTEL";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Session cookie and token lifetime settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Route gate settings.
    #[serde(default)]
    pub gate: GateConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml` with `config/{env}.toml` and environment
    /// variables prefixed with `HOSTEL__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config", env)
    }

    /// Load configuration from an explicit directory.
    pub fn load_from(dir: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Startup checks that must pass before the server accepts traffic.
    ///
    /// Returns the first violation as a `Configuration` error.
    pub fn validate(&self) -> Result<(), AppError> {
        let secret = self.auth.jwt_secret.trim();
        if secret.is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret is not set (use HOSTEL__AUTH__JWT_SECRET)",
            ));
        }
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(AppError::configuration(format!(
                "auth.jwt_secret must be at least {MIN_SECRET_LENGTH} characters long"
            )));
        }

        if self.session.token_ttl_hours == 0 || self.session.remember_me_ttl_days == 0 {
            return Err(AppError::configuration(
                "session token lifetimes must be greater than zero",
            ));
        }
        if self.session.cookie_name.trim().is_empty() {
            return Err(AppError::configuration("session.cookie_name is empty"));
        }

        if self.auth.password_min_score > 4 {
            return Err(AppError::configuration(
                "auth.password_min_score must be between 0 and 4",
            ));
        }

        let gate = &self.gate;
        let paths = [
            ("gate.api_prefix", &gate.api_prefix),
            ("gate.login_path", &gate.login_path),
            ("gate.student.login", &gate.student.login),
            ("gate.student.home", &gate.student.home),
            ("gate.hostel_owner.login", &gate.hostel_owner.login),
            ("gate.hostel_owner.home", &gate.hostel_owner.home),
            ("gate.admin.login", &gate.admin.login),
            ("gate.admin.home", &gate.admin.home),
        ];
        for (name, path) in paths {
            if !path.starts_with('/') {
                return Err(AppError::configuration(format!(
                    "{name} must be an absolute path, got '{path}'"
                )));
            }
        }

        Ok(())
    }
}
