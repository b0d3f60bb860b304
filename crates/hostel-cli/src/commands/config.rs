//! Configuration checks.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use hostel_auth::gate::table::UNMATCHED_ACCESS;
use hostel_auth::{JwtEncoder, RouteTable};
use hostel_core::config::AppConfig;
use hostel_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Run the startup checks and print the effective route table
    Check,
}

/// Route rule display row
#[derive(Debug, Serialize, Tabled)]
struct RuleRow {
    /// Path prefix
    prefix: String,
    /// Required access
    access: String,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Check => {
            let table = match check(config) {
                Ok(table) => table,
                Err(e) => {
                    output::print_error(&format!("Configuration invalid: {e}"));
                    return Err(e);
                }
            };

            output::print_success("Configuration is valid");
            output::print_kv(
                "Server",
                &format!("{}:{}", config.server.host, config.server.port),
            );
            output::print_kv("Session cookie", &config.session.cookie_name);
            output::print_kv(
                "Token lifetime",
                &format!(
                    "{}h ({}d with remember me)",
                    config.session.token_ttl_hours, config.session.remember_me_ttl_days
                ),
            );
            output::print_kv("Unmatched paths", &UNMATCHED_ACCESS.to_string());

            let rows: Vec<RuleRow> = table
                .rules()
                .iter()
                .map(|r| RuleRow {
                    prefix: r.prefix.clone(),
                    access: r.access.to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}

fn check(config: &AppConfig) -> Result<RouteTable, AppError> {
    config.validate()?;
    JwtEncoder::new(&config.auth, &config.session)?;
    RouteTable::new(&config.gate.rules)
}
