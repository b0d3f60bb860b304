//! Database migration management commands.

use clap::{Args, Subcommand};

use hostel_core::config::AppConfig;
use hostel_core::error::AppError;
use hostel_database::DatabasePool;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    let pool = DatabasePool::connect(&config.database).await?;

    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            let result = hostel_database::migration::run_migrations(&pool).await;
            pool.close().await;
            result?;
            output::print_success("All migrations applied successfully.");
        }
    }

    Ok(())
}
