//! In-memory account store.
//!
//! Backs the integration tests and the `--memory` development mode. Follows
//! the same contract as the PostgreSQL repository, including
//! case-insensitive email uniqueness.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use hostel_core::error::AppError;
use hostel_core::result::AppResult;
use hostel_core::types::{AccountId, PageRequest, PageResponse};
use hostel_entity::account::{Account, AccountFilter, AccountProfile, AccountStatus, NewAccount};

use crate::store::AccountStore;

/// Account store held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountStore {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl MemoryAccountStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts, deleted ones included.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Whether the store holds no accounts.
    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

fn not_found(id: AccountId) -> AppError {
    AppError::not_found(format!("Account {id} not found"))
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let email = email.to_lowercase();
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.email.to_lowercase() == email)
            .cloned())
    }

    async fn create(&self, account: NewAccount) -> AppResult<Account> {
        let email = account.email.to_lowercase();
        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.email.to_lowercase() == email) {
            return Err(AppError::conflict(
                "An account with this email already exists",
            ));
        }
        let account = account.into_account();
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update_profile(&self, id: AccountId, profile: &AccountProfile) -> AppResult<Account> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(&id)
            .filter(|a| a.role() == profile.role())
            .ok_or_else(|| not_found(id))?;
        account.profile = profile.clone();
        account.updated_at = Utc::now();
        Ok(account.clone())
    }

    async fn update_password(&self, id: AccountId, password_hash: &str) -> AppResult<()> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(&id).ok_or_else(|| not_found(id))?;
        account.password_hash = password_hash.to_string();
        account.updated_at = Utc::now();
        Ok(())
    }

    async fn update_status(&self, id: AccountId, status: AccountStatus) -> AppResult<Account> {
        let mut accounts = self.accounts.write().await;
        // Soft-deleted accounts are terminal.
        let account = accounts
            .get_mut(&id)
            .filter(|a| !a.is_deleted())
            .ok_or_else(|| not_found(id))?;
        account.status = status;
        account.updated_at = Utc::now();
        Ok(account.clone())
    }

    async fn record_login(&self, id: AccountId) -> AppResult<()> {
        if let Some(account) = self.accounts.write().await.get_mut(&id) {
            account.last_login_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn delete(&self, id: AccountId) -> AppResult<bool> {
        Ok(self.accounts.write().await.remove(&id).is_some())
    }

    async fn list(
        &self,
        filter: AccountFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<Account>> {
        let accounts = self.accounts.read().await;
        let mut matching: Vec<Account> = accounts
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .collect();

        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }
}
