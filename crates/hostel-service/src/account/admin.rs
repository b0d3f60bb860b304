//! Admin account management: listing, creation, status changes, deletion.

use std::sync::Arc;

use tracing::info;

use hostel_core::error::AppError;
use hostel_core::types::{AccountId, PageRequest, PageResponse};
use hostel_database::AccountStore;
use hostel_entity::account::{Account, AccountFilter, AccountStatus};

use crate::context::RequestContext;

use super::factory::{AccountFactory, CreateAccountRequest};

/// Handles administrative account operations.
#[derive(Debug, Clone)]
pub struct AdminAccountService {
    /// Account store.
    store: Arc<dyn AccountStore>,
    /// Validation and hashing for new accounts.
    factory: AccountFactory,
}

impl AdminAccountService {
    /// Creates a new admin account service.
    pub fn new(store: Arc<dyn AccountStore>, factory: AccountFactory) -> Self {
        Self { store, factory }
    }

    /// Lists accounts with optional role/status filters.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: AccountFilter,
        page: PageRequest,
    ) -> Result<PageResponse<Account>, AppError> {
        ctx.require_admin()?;
        self.store.list(filter, page).await
    }

    /// Gets a single account, soft-deleted ones included.
    pub async fn get(&self, ctx: &RequestContext, id: AccountId) -> Result<Account, AppError> {
        ctx.require_admin()?;
        self.find(id).await
    }

    /// Creates an account of any role.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateAccountRequest,
    ) -> Result<Account, AppError> {
        ctx.require_admin()?;

        let account = self.store.create(self.factory.build(req)?).await?;

        info!(
            admin_id = %ctx.account_id,
            account_id = %account.id,
            role = %account.role(),
            "Account created by admin"
        );

        Ok(account)
    }

    /// Activates or deactivates an account.
    ///
    /// Soft-deleted accounts are treated as absent, and an admin cannot
    /// deactivate their own account.
    pub async fn set_status(
        &self,
        ctx: &RequestContext,
        id: AccountId,
        status: AccountStatus,
    ) -> Result<Account, AppError> {
        ctx.require_admin()?;

        if status == AccountStatus::Deleted {
            return Err(AppError::validation(
                "Use the delete operation to delete an account",
            ));
        }
        if id == ctx.account_id && status != AccountStatus::Active {
            return Err(AppError::authorization(
                "Admins cannot deactivate their own account",
            ));
        }

        let account = self.find(id).await?;
        if account.is_deleted() {
            return Err(not_found(id));
        }
        if account.status == status {
            return Ok(account);
        }

        let updated = self.store.update_status(id, status).await?;

        info!(
            admin_id = %ctx.account_id,
            account_id = %id,
            status = %status,
            "Account status changed"
        );

        Ok(updated)
    }

    /// Deletes an account. Soft delete keeps the row with status `deleted`;
    /// hard delete removes it.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        id: AccountId,
        hard: bool,
    ) -> Result<(), AppError> {
        ctx.require_admin()?;

        if id == ctx.account_id {
            return Err(AppError::authorization(
                "Admins cannot delete their own account",
            ));
        }

        if hard {
            if !self.store.delete(id).await? {
                return Err(not_found(id));
            }
        } else {
            let account = self.find(id).await?;
            if account.is_deleted() {
                return Err(not_found(id));
            }
            self.store.update_status(id, AccountStatus::Deleted).await?;
        }

        info!(
            admin_id = %ctx.account_id,
            account_id = %id,
            hard,
            "Account deleted"
        );

        Ok(())
    }

    async fn find(&self, id: AccountId) -> Result<Account, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: AccountId) -> AppError {
    AppError::not_found(format!("Account {id} not found"))
}

#[cfg(test)]
mod tests {
    use hostel_auth::password::{PasswordHasher, PasswordValidator};
    use hostel_core::config::AuthConfig;
    use hostel_core::error::ErrorKind;
    use hostel_database::MemoryAccountStore;
    use hostel_entity::account::{ProfileUpdate, Role};

    use super::*;

    fn service() -> AdminAccountService {
        let factory = AccountFactory::new(
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&AuthConfig::default())),
        );
        AdminAccountService::new(Arc::new(MemoryAccountStore::new()), factory)
    }

    fn admin_ctx() -> RequestContext {
        RequestContext::new(AccountId::new(), Role::Admin, "root@example.com")
    }

    fn request(email: &str, role: Role) -> CreateAccountRequest {
        CreateAccountRequest {
            email: email.to_string(),
            password: "saffron-Glacier-27-ribbon".to_string(),
            role,
            full_name: "Someone".to_string(),
            details: ProfileUpdate::default(),
        }
    }

    #[tokio::test]
    async fn test_non_admin_rejected() {
        let service = service();
        let ctx = RequestContext::new(AccountId::new(), Role::Student, "s@example.com");
        let err = service
            .list(&ctx, AccountFilter::default(), PageRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_admin_creates_any_role() {
        let service = service();
        let ctx = admin_ctx();
        for (i, role) in Role::ALL.into_iter().enumerate() {
            let account = service
                .create(&ctx, request(&format!("u{i}@example.com"), role))
                .await
                .unwrap();
            assert_eq!(account.role(), role);
        }
        let page = service
            .list(&ctx, AccountFilter::default(), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total_items, 3);
    }

    #[tokio::test]
    async fn test_deactivate_and_reactivate() {
        let service = service();
        let ctx = admin_ctx();
        let account = service
            .create(&ctx, request("s@example.com", Role::Student))
            .await
            .unwrap();
        let off = service
            .set_status(&ctx, account.id, AccountStatus::Inactive)
            .await
            .unwrap();
        assert_eq!(off.status, AccountStatus::Inactive);
        let on = service
            .set_status(&ctx, account.id, AccountStatus::Active)
            .await
            .unwrap();
        assert_eq!(on.status, AccountStatus::Active);
    }

    #[tokio::test]
    async fn test_soft_then_hard_delete() {
        let service = service();
        let ctx = admin_ctx();
        let account = service
            .create(&ctx, request("o@example.com", Role::HostelOwner))
            .await
            .unwrap();

        service.delete(&ctx, account.id, false).await.unwrap();
        let soft = service.get(&ctx, account.id).await.unwrap();
        assert!(soft.is_deleted());

        let err = service.delete(&ctx, account.id, false).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        let err = service
            .set_status(&ctx, account.id, AccountStatus::Active)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        service.delete(&ctx, account.id, true).await.unwrap();
        let err = service.get(&ctx, account.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_admin_cannot_delete_self() {
        let service = service();
        let ctx = admin_ctx();
        let err = service.delete(&ctx, ctx.account_id, true).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        let err = service
            .set_status(&ctx, ctx.account_id, AccountStatus::Inactive)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }
}
