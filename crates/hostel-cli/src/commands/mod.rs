//! CLI command definitions and dispatch.

pub mod account;
pub mod config;
pub mod migrate;
pub mod token;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use hostel_core::config::AppConfig;
use hostel_core::error::AppError;
use hostel_database::{AccountRepository, AccountStore, DatabasePool};

use crate::output::OutputFormat;

/// Hostel platform administration
#[derive(Debug, Parser)]
#[command(name = "hostel-cli", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and the environment overlays
    #[arg(short, long, default_value = "config")]
    pub config_dir: String,

    /// Environment overlay to apply
    #[arg(short, long, env = "HOSTEL_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Account management
    Account(account::AccountArgs),
    /// Configuration checks
    Config(config::ConfigArgs),
    /// Session token tooling
    Token(token::TokenArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load_from(&self.config_dir, &self.env)?;
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Account(args) => account::execute(args, &config, self.format).await,
            Commands::Config(args) => config::execute(args, &config, self.format),
            Commands::Token(args) => token::execute(args, &config).await,
        }
    }
}

/// Helper: connect to the database and build the account store
pub async fn connect_store(
    config: &AppConfig,
) -> Result<(DatabasePool, Arc<dyn AccountStore>), AppError> {
    let pool = DatabasePool::connect(&config.database).await?;
    let store: Arc<dyn AccountStore> = Arc::new(AccountRepository::new(&pool));
    Ok((pool, store))
}
