//! Email/password verification against the account store.

use std::sync::Arc;

use tracing::{debug, warn};

use hostel_core::error::AppError;
use hostel_database::AccountStore;
use hostel_entity::account::{Account, AccountStatus};

use crate::password::PasswordHasher;

/// Message returned for every failed credential check.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Plaintext hashed once at startup so unknown emails cost one Argon2 run.
const DUMMY_PASSWORD: &str = "hostel-platform-dummy-password";

/// Checks submitted credentials against stored hashes.
#[derive(Debug, Clone)]
pub struct CredentialVerifier {
    /// Account lookups.
    store: Arc<dyn AccountStore>,
    /// Argon2 hasher.
    hasher: PasswordHasher,
    /// Hash verified when no account matches the email.
    dummy_hash: Arc<str>,
}

impl CredentialVerifier {
    /// Creates a verifier over the given store.
    pub fn new(store: Arc<dyn AccountStore>) -> Result<Self, AppError> {
        let hasher = PasswordHasher::new();
        let dummy_hash = hasher.hash_password(DUMMY_PASSWORD)?.into();
        Ok(Self {
            store,
            hasher,
            dummy_hash,
        })
    }

    /// Verifies `email` and `password`, returning the matching account.
    ///
    /// Unknown, soft-deleted, and mismatched accounts all fail with the same
    /// `Authentication` error. An inactive account with the right password
    /// fails with `Authorization`.
    pub async fn verify(&self, email: &str, password: &str) -> Result<Account, AppError> {
        let email = email.trim().to_lowercase();
        let account = self
            .store
            .find_by_email(&email)
            .await?
            .filter(|a| !a.is_deleted());

        let Some(account) = account else {
            // Result is discarded; only the cost matters.
            let _ = self.hasher.verify_password(password, &self.dummy_hash);
            warn!(email = %email, "Login failed: unknown account");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        if !self
            .hasher
            .verify_password(password, &account.password_hash)?
        {
            warn!(account_id = %account.id, "Login failed: wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        if account.status == AccountStatus::Inactive {
            warn!(account_id = %account.id, "Login refused: account inactive");
            return Err(AppError::authorization("Account is deactivated"));
        }

        debug!(account_id = %account.id, role = %account.role(), "Credentials verified");
        Ok(account)
    }
}
