//! Account management CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use hostel_auth::password::{PasswordHasher, PasswordValidator};
use hostel_core::config::AppConfig;
use hostel_core::error::AppError;
use hostel_core::types::PageRequest;
use hostel_database::AccountStore;
use hostel_entity::account::{Account, AccountFilter, AccountStatus, ProfileUpdate, Role};
use hostel_service::{AccountFactory, CreateAccountRequest};
use hostel_service::account::factory::normalize_email;

use crate::output::{self, OutputFormat};

/// Arguments for account commands
#[derive(Debug, Args)]
pub struct AccountArgs {
    /// Account subcommand
    #[command(subcommand)]
    pub command: AccountCommand,
}

/// Account subcommands
#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Create an account of any role
    Create {
        /// Login email
        #[arg(long)]
        email: String,
        /// Role: student, hostel-owner or admin
        #[arg(long, default_value = "admin")]
        role: Role,
        /// Full name
        #[arg(long)]
        name: String,
        /// Initial password; prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// List accounts, newest first
    List {
        /// Filter by role
        #[arg(short, long)]
        role: Option<Role>,
        /// Filter by status
        #[arg(short, long)]
        status: Option<AccountStatus>,
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Accounts per page
        #[arg(long, default_value_t = 50)]
        per_page: u64,
    },
    /// Allow an account to sign in again
    Activate {
        /// Account email
        email: String,
    },
    /// Block an account from signing in
    Deactivate {
        /// Account email
        email: String,
    },
}

/// Account display row for table output
#[derive(Debug, Serialize, Tabled)]
struct AccountRow {
    /// Account ID
    id: String,
    /// Email
    email: String,
    /// Full name
    name: String,
    /// Role
    role: String,
    /// Status
    status: String,
    /// Created at
    created_at: String,
    /// Last login
    last_login: String,
}

impl From<&Account> for AccountRow {
    fn from(a: &Account) -> Self {
        Self {
            id: a.id.to_string(),
            email: a.email.clone(),
            name: a.profile.full_name().to_string(),
            role: a.role().to_string(),
            status: a.status.to_string(),
            created_at: a.created_at.format("%Y-%m-%d %H:%M").to_string(),
            last_login: a
                .last_login_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Execute account commands
pub async fn execute(
    args: &AccountArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (pool, store) = super::connect_store(config).await?;
    let result = run(args, config, store, format).await;
    pool.close().await;
    result
}

async fn run(
    args: &AccountArgs,
    config: &AppConfig,
    store: Arc<dyn AccountStore>,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        AccountCommand::Create {
            email,
            role,
            name,
            password,
        } => {
            let password = match password {
                Some(p) => p.clone(),
                None => prompt_password()?,
            };
            let factory = AccountFactory::new(
                Arc::new(PasswordHasher::new()),
                Arc::new(PasswordValidator::new(&config.auth)),
            );
            let new_account = factory.build(CreateAccountRequest {
                email: email.clone(),
                password,
                role: *role,
                full_name: name.clone(),
                details: ProfileUpdate::default(),
            })?;
            let account = store.create(new_account).await?;

            output::print_success(&format!(
                "Created {} account '{}'",
                account.role(),
                account.email
            ));
            output::print_kv("ID", &account.id.to_string());
        }
        AccountCommand::List {
            role,
            status,
            page,
            per_page,
        } => {
            let filter = AccountFilter {
                role: *role,
                status: *status,
            };
            let page = store
                .list(filter, PageRequest::new(*page, *per_page))
                .await?;

            let rows: Vec<AccountRow> = page.items.iter().map(AccountRow::from).collect();
            output::print_list(&rows, format);
            if format == OutputFormat::Table {
                println!(
                    "Page {} of {} ({} accounts)",
                    page.page, page.total_pages, page.total_items
                );
            }
        }
        AccountCommand::Activate { email } => {
            set_status(store.as_ref(), email, AccountStatus::Active).await?;
            output::print_success(&format!("Account '{email}' activated"));
        }
        AccountCommand::Deactivate { email } => {
            set_status(store.as_ref(), email, AccountStatus::Inactive).await?;
            output::print_success(&format!("Account '{email}' deactivated"));
        }
    }

    Ok(())
}

async fn set_status(
    store: &dyn AccountStore,
    email: &str,
    status: AccountStatus,
) -> Result<(), AppError> {
    let email = normalize_email(email)?;
    let account = store
        .find_by_email(&email)
        .await?
        .filter(|a| !a.is_deleted())
        .ok_or_else(|| AppError::not_found(format!("Account '{email}' not found")))?;

    if account.status != status {
        store.update_status(account.id, status).await?;
    }
    Ok(())
}

fn prompt_password() -> Result<String, AppError> {
    dialoguer::Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}
