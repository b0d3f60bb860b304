//! Validation and hashing shared by self-registration and admin creation.

use std::sync::Arc;

use hostel_auth::password::{PasswordHasher, PasswordValidator};
use hostel_core::error::AppError;
use hostel_entity::account::{AccountProfile, NewAccount, ProfileUpdate, Role};

/// Request to create an account.
#[derive(Debug, Clone)]
pub struct CreateAccountRequest {
    /// Login email.
    pub email: String,
    /// Initial password, plaintext.
    pub password: String,
    /// Role of the new account.
    pub role: Role,
    /// Full name.
    pub full_name: String,
    /// Role-specific fields. Fields of other roles are rejected.
    pub details: ProfileUpdate,
}

/// Turns a [`CreateAccountRequest`] into a storable [`NewAccount`].
#[derive(Debug, Clone)]
pub struct AccountFactory {
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
}

impl AccountFactory {
    /// Creates a new factory.
    pub fn new(hasher: Arc<PasswordHasher>, validator: Arc<PasswordValidator>) -> Self {
        Self { hasher, validator }
    }

    /// The password hasher.
    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    /// The new-password policy.
    pub fn validator(&self) -> &PasswordValidator {
        &self.validator
    }

    /// Validates the request and hashes the password.
    pub fn build(&self, req: CreateAccountRequest) -> Result<NewAccount, AppError> {
        let email = normalize_email(&req.email)?;

        let full_name = req.full_name.trim();
        if full_name.is_empty() {
            return Err(AppError::validation("Full name is required"));
        }

        let mut profile = AccountProfile::new(req.role, full_name);
        profile.apply(ProfileUpdate {
            full_name: None,
            ..req.details
        })?;

        self.validator
            .validate(&req.password, &[email.as_str(), full_name])?;
        let password_hash = self.hasher.hash_password(&req.password)?;

        Ok(NewAccount {
            email,
            password_hash,
            profile,
        })
    }
}

/// Trims and lowercases an email, rejecting obviously malformed ones.
pub fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AppError::validation("Invalid email format")),
    }
}
