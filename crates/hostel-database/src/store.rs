//! The account store seam between services and persistence.

use async_trait::async_trait;

use hostel_core::result::AppResult;
use hostel_core::types::{AccountId, PageRequest, PageResponse};
use hostel_entity::account::{Account, AccountFilter, AccountProfile, AccountStatus, NewAccount};

/// Persistence operations on accounts.
///
/// Email lookups are case-insensitive. Soft-deleted accounts are returned
/// by lookups; callers decide how to treat them.
#[async_trait]
pub trait AccountStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find an account by primary key.
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>>;

    /// Find an account by email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Insert a new account. Fails with `Conflict` if the email is taken.
    async fn create(&self, account: NewAccount) -> AppResult<Account>;

    /// Replace the role-specific profile. The role itself cannot change.
    async fn update_profile(&self, id: AccountId, profile: &AccountProfile) -> AppResult<Account>;

    /// Replace the password hash.
    async fn update_password(&self, id: AccountId, password_hash: &str) -> AppResult<()>;

    /// Change the lifecycle status.
    async fn update_status(&self, id: AccountId, status: AccountStatus) -> AppResult<Account>;

    /// Record a successful login.
    async fn record_login(&self, id: AccountId) -> AppResult<()>;

    /// Remove the account row. Returns `true` if a row was deleted.
    async fn delete(&self, id: AccountId) -> AppResult<bool>;

    /// List accounts, newest first.
    async fn list(
        &self,
        filter: AccountFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<Account>>;
}
