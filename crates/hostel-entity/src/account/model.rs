//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use hostel_core::error::AppError;
use hostel_core::types::AccountId;

use super::profile::AccountProfile;
use super::role::Role;
use super::status::AccountStatus;

/// A registered account: student, hostel owner, or admin.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    /// Unique account identifier.
    pub id: AccountId,
    /// Login email, unique case-insensitively.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role-tagged profile; flattened into `role` + `profile` on the wire.
    #[serde(flatten)]
    pub profile: AccountProfile,
    /// Lifecycle status.
    pub status: AccountStatus,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Account {
    /// The account's role, derived from its profile.
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    /// Check if the account can log in right now.
    pub fn can_login(&self) -> bool {
        self.status.can_login()
    }

    /// Check if the account has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.status == AccountStatus::Deleted
    }
}

/// Data required to create a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Login email (normalized by the caller).
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Role-tagged profile.
    pub profile: AccountProfile,
}

impl NewAccount {
    /// Materialize the account with a fresh id and timestamps.
    pub fn into_account(self) -> Account {
        let now = Utc::now();
        Account {
            id: AccountId::new(),
            email: self.email,
            password_hash: self.password_hash,
            profile: self.profile,
            status: AccountStatus::Active,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }
}

/// Filter for account listings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AccountFilter {
    /// Only accounts of this role.
    pub role: Option<Role>,
    /// Only accounts with this status.
    pub status: Option<AccountStatus>,
}

impl AccountFilter {
    /// Check whether an account passes the filter.
    pub fn matches(&self, account: &Account) -> bool {
        self.role.is_none_or(|r| r == account.role())
            && self.status.is_none_or(|s| s == account.status)
    }
}

/// Raw `accounts` table row.
#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    /// Primary key.
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Argon2 hash.
    pub password_hash: String,
    /// Role tag.
    pub role: String,
    /// Role-specific payload.
    pub profile: serde_json::Value,
    /// Status string.
    pub status: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Last login time.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AppError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let role: Role = row.role.parse()?;
        Ok(Self {
            id: AccountId::from_uuid(row.id),
            email: row.email,
            password_hash: row.password_hash,
            profile: AccountProfile::from_parts(role, row.profile)?,
            status: row.status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            last_login_at: row.last_login_at,
        })
    }
}
