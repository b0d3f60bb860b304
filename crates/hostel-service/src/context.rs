//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hostel_auth::Claims;
use hostel_core::error::AppError;
use hostel_core::types::AccountId;
use hostel_entity::account::Role;

/// Context for the current authenticated request.
///
/// Built from verified token claims and passed into service methods so
/// that every operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The caller's account ID.
    pub account_id: AccountId,
    /// The caller's role at the time the token was issued.
    pub role: Role,
    /// The caller's email at the time the token was issued.
    pub email: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(account_id: AccountId, role: Role, email: impl Into<String>) -> Self {
        Self {
            account_id,
            role,
            email: email.into(),
            request_time: Utc::now(),
        }
    }

    /// Returns whether the caller is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Fails with `Authorization` unless the caller is an admin.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::authorization("Admin role required"))
        }
    }
}

impl From<&Claims> for RequestContext {
    fn from(claims: &Claims) -> Self {
        Self::new(claims.sub, claims.role, claims.email.clone())
    }
}
