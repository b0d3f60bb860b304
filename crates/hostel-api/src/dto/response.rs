//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hostel_core::types::{AccountId, PageResponse};
use hostel_entity::account::{Account, AccountProfile, AccountStatus, Role};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T: Serialize> {
    /// Items in this page.
    pub items: Vec<T>,
    /// Total item count.
    pub total: u64,
    /// Current page.
    pub page: u64,
    /// Items per page.
    pub per_page: u64,
    /// Total pages.
    pub total_pages: u64,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Converts a store page, mapping each item.
    pub fn from_page<U>(page: PageResponse<U>, f: impl FnMut(U) -> T) -> Self {
        Self {
            items: page.items.into_iter().map(f).collect(),
            total: page.total_items,
            page: page.page,
            per_page: page.page_size,
            total_pages: page.total_pages,
        }
    }
}

/// Account as returned by the API. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: AccountId,
    /// Email.
    pub email: String,
    /// Role and role-specific profile.
    #[serde(flatten)]
    pub profile: AccountProfile,
    /// Status.
    pub status: AccountStatus,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
    /// Last login.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            profile: account.profile,
            status: account.status,
            created_at: account.created_at,
            updated_at: account.updated_at,
            last_login_at: account.last_login_at,
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The signed-in account.
    pub user: AccountResponse,
    /// Session token, also set as the session cookie.
    pub token: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
    /// Where the client should navigate next.
    pub redirect_to: String,
}

/// Current session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    /// Subject of the token.
    pub account_id: AccountId,
    /// Role in the token.
    pub role: Role,
    /// Email in the token.
    pub email: String,
    /// Token issue time.
    pub issued_at: DateTime<Utc>,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
    /// The live account.
    pub account: AccountResponse,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// `connected`, `unavailable`, or `in-memory`.
    pub database: String,
}
