//! Account self-service: registration, profile viewing and editing, and
//! password changes.

use std::sync::Arc;

use tracing::info;

use hostel_core::error::AppError;
use hostel_database::AccountStore;
use hostel_entity::account::{Account, ProfileUpdate};

use crate::context::RequestContext;

use super::factory::{AccountFactory, CreateAccountRequest};

/// Handles account self-service operations.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// Account store.
    store: Arc<dyn AccountStore>,
    /// Validation and hashing for new accounts and passwords.
    factory: AccountFactory,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(store: Arc<dyn AccountStore>, factory: AccountFactory) -> Self {
        Self { store, factory }
    }

    /// Self-registers a student or hostel owner account.
    pub async fn register(&self, req: CreateAccountRequest) -> Result<Account, AppError> {
        if !req.role.can_self_register() {
            return Err(AppError::authorization(format!(
                "{} accounts cannot be self-registered",
                req.role
            )));
        }

        let account = self.store.create(self.factory.build(req)?).await?;

        info!(
            account_id = %account.id,
            role = %account.role(),
            "Account registered"
        );

        Ok(account)
    }

    /// Gets the caller's own account.
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<Account, AppError> {
        self.store
            .find_by_id(ctx.account_id)
            .await?
            .filter(|a| !a.is_deleted())
            .ok_or_else(|| AppError::not_found("Account not found"))
    }

    /// Applies a partial edit to the caller's own profile.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        update: ProfileUpdate,
    ) -> Result<Account, AppError> {
        let account = self.get_profile(ctx).await?;

        let mut profile = account.profile;
        profile.apply(update)?;

        let updated = self.store.update_profile(ctx.account_id, &profile).await?;

        info!(account_id = %ctx.account_id, "Profile updated");

        Ok(updated)
    }

    /// Changes the caller's password after checking the current one.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let account = self.get_profile(ctx).await?;

        let valid = self
            .factory
            .hasher()
            .verify_password(current_password, &account.password_hash)?;
        if !valid {
            return Err(AppError::authentication("Current password is incorrect"));
        }

        let validator = self.factory.validator();
        validator.validate_not_same(current_password, new_password)?;
        validator.validate(
            new_password,
            &[account.email.as_str(), account.profile.full_name()],
        )?;

        let new_hash = self.factory.hasher().hash_password(new_password)?;
        self.store
            .update_password(ctx.account_id, &new_hash)
            .await?;

        info!(account_id = %ctx.account_id, "Password changed");

        Ok(())
    }
}
