//! Account repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use hostel_core::error::{AppError, ErrorKind};
use hostel_core::result::AppResult;
use hostel_core::types::{AccountId, PageRequest, PageResponse};
use hostel_entity::account::{
    Account, AccountFilter, AccountProfile, AccountRow, AccountStatus, NewAccount,
};

use crate::connection::DatabasePool;
use crate::retry::RetryPolicy;
use crate::store::AccountStore;

/// PostgreSQL-backed account store.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
    retry: RetryPolicy,
}

impl AccountRepository {
    /// Create a new account repository on the shared pool.
    pub fn new(pool: &DatabasePool) -> Self {
        Self {
            pool: pool.pool().clone(),
            retry: pool.retry_policy(),
        }
    }

    async fn fetch_one_row(
        &self,
        operation: &'static str,
        sql: &'static str,
        id: AccountId,
    ) -> AppResult<Option<Account>> {
        let row = self
            .retry
            .run(operation, || {
                sqlx::query_as::<_, AccountRow>(sql)
                    .bind(id)
                    .fetch_optional(&self.pool)
            })
            .await
            .map_err(|e| db_error(operation, e))?;

        row.map(Account::try_from).transpose()
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        self.fetch_one_row(
            "find account by id",
            "SELECT * FROM accounts WHERE id = $1",
            id,
        )
        .await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let row = self
            .retry
            .run("find account by email", || {
                sqlx::query_as::<_, AccountRow>(
                    "SELECT * FROM accounts WHERE LOWER(email) = LOWER($1)",
                )
                .bind(email)
                .fetch_optional(&self.pool)
            })
            .await
            .map_err(|e| db_error("find account by email", e))?;

        row.map(Account::try_from).transpose()
    }

    // Not retried: a lost acknowledgement would turn a retry into a conflict.
    async fn create(&self, account: NewAccount) -> AppResult<Account> {
        let account = account.into_account();
        let payload = account.profile.payload()?;

        let row = sqlx::query_as::<_, AccountRow>(
            "INSERT INTO accounts \
             (id, email, password_hash, role, profile, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(account.id)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.role().as_str())
        .bind(&payload)
        .bind(account.status.as_str())
        .bind(account.created_at)
        .bind(account.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("An account with this email already exists")
            } else {
                db_error("create account", e)
            }
        })?;

        Account::try_from(row)
    }

    async fn update_profile(&self, id: AccountId, profile: &AccountProfile) -> AppResult<Account> {
        let payload = profile.payload()?;
        let role = profile.role().as_str();

        let row = self
            .retry
            .run("update profile", || {
                sqlx::query_as::<_, AccountRow>(
                    "UPDATE accounts SET profile = $2, updated_at = NOW() \
                     WHERE id = $1 AND role = $3 RETURNING *",
                )
                .bind(id)
                .bind(&payload)
                .bind(role)
                .fetch_optional(&self.pool)
            })
            .await
            .map_err(|e| db_error("update profile", e))?
            .ok_or_else(|| not_found(id))?;

        Account::try_from(row)
    }

    async fn update_password(&self, id: AccountId, password_hash: &str) -> AppResult<()> {
        let result = self
            .retry
            .run("update password", || {
                sqlx::query(
                    "UPDATE accounts SET password_hash = $2, updated_at = NOW() WHERE id = $1",
                )
                .bind(id)
                .bind(password_hash)
                .execute(&self.pool)
            })
            .await
            .map_err(|e| db_error("update password", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn update_status(&self, id: AccountId, status: AccountStatus) -> AppResult<Account> {
        // Soft-deleted rows are terminal and never match.
        let row = self
            .retry
            .run("update status", || {
                sqlx::query_as::<_, AccountRow>(
                    "UPDATE accounts SET status = $2, updated_at = NOW() \
                     WHERE id = $1 AND status <> 'deleted' RETURNING *",
                )
                .bind(id)
                .bind(status.as_str())
                .fetch_optional(&self.pool)
            })
            .await
            .map_err(|e| db_error("update status", e))?
            .ok_or_else(|| not_found(id))?;

        Account::try_from(row)
    }

    async fn record_login(&self, id: AccountId) -> AppResult<()> {
        self.retry
            .run("record login", || {
                sqlx::query("UPDATE accounts SET last_login_at = NOW() WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool)
            })
            .await
            .map_err(|e| db_error("record login", e))?;
        Ok(())
    }

    async fn delete(&self, id: AccountId) -> AppResult<bool> {
        let result = self
            .retry
            .run("delete account", || {
                sqlx::query("DELETE FROM accounts WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool)
            })
            .await
            .map_err(|e| db_error("delete account", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(
        &self,
        filter: AccountFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<Account>> {
        let role = filter.role.map(|r| r.as_str());
        let status = filter.status.map(|s| s.as_str());
        let limit = i64::try_from(page.limit()).unwrap_or(i64::MAX);
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

        let total: i64 = self
            .retry
            .run("count accounts", || {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM accounts \
                     WHERE ($1::text IS NULL OR role = $1) AND ($2::text IS NULL OR status = $2)",
                )
                .bind(role)
                .bind(status)
                .fetch_one(&self.pool)
            })
            .await
            .map_err(|e| db_error("count accounts", e))?;

        let rows = self
            .retry
            .run("list accounts", || {
                sqlx::query_as::<_, AccountRow>(
                    "SELECT * FROM accounts \
                     WHERE ($1::text IS NULL OR role = $1) AND ($2::text IS NULL OR status = $2) \
                     ORDER BY created_at DESC, id DESC LIMIT $3 OFFSET $4",
                )
                .bind(role)
                .bind(status)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
            })
            .await
            .map_err(|e| db_error("list accounts", e))?;

        let accounts = rows
            .into_iter()
            .map(Account::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(PageResponse::new(
            accounts,
            page.page,
            page.page_size,
            total.max(0) as u64,
        ))
    }
}

fn not_found(id: AccountId) -> AppError {
    AppError::not_found(format!("Account {id} not found"))
}

fn db_error(operation: &str, err: sqlx::Error) -> AppError {
    AppError::with_source(ErrorKind::Database, format!("Failed to {operation}"), err)
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}
