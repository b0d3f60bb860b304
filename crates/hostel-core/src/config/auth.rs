//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Minimum accepted length of the token signing secret.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). Has no default; an empty
    /// value fails startup validation.
    #[serde(default)]
    pub jwt_secret: String,
    /// Value of the `iss` claim.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Minimum password length for new passwords.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Minimum zxcvbn strength score (0-4) for new passwords.
    #[serde(default = "default_password_score")]
    pub password_min_score: u8,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            issuer: default_issuer(),
            password_min_length: default_password_min(),
            password_min_score: default_password_score(),
        }
    }
}

fn default_issuer() -> String {
    "hostel-platform".to_string()
}

fn default_password_min() -> usize {
    8
}

fn default_password_score() -> u8 {
    2
}
