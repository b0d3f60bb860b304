//! Session token tooling.

use clap::{Args, Subcommand};

use hostel_auth::JwtEncoder;
use hostel_core::config::AppConfig;
use hostel_core::error::AppError;
use hostel_service::account::factory::normalize_email;

use crate::output;

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Issue a session token for an active account
    Issue {
        /// Account email
        email: String,
        /// Use the extended remember-me lifetime
        #[arg(long)]
        remember_me: bool,
    },
}

/// Execute token commands
pub async fn execute(args: &TokenArgs, config: &AppConfig) -> Result<(), AppError> {
    match &args.command {
        TokenCommand::Issue { email, remember_me } => {
            config.validate()?;
            let encoder = JwtEncoder::new(&config.auth, &config.session)?;

            let (pool, store) = super::connect_store(config).await?;
            let email = normalize_email(email)?;
            let found = store.find_by_email(&email).await;
            pool.close().await;

            let account = found?
                .filter(|a| !a.is_deleted())
                .ok_or_else(|| AppError::not_found(format!("Account '{email}' not found")))?;
            if !account.can_login() {
                return Err(AppError::authorization("Account is deactivated"));
            }

            let issued = encoder.issue(account.id, account.role(), &account.email, *remember_me)?;

            output::print_success(&format!("Token issued for '{}'", account.email));
            output::print_kv("Role", account.role().as_str());
            output::print_kv("Expires at", &issued.expires_at.to_rfc3339());
            println!("{}", issued.token);
        }
    }

    Ok(())
}
