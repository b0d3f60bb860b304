//! Session carrier configuration.

use serde::{Deserialize, Serialize};

/// Cookie and token lifetime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether the cookie carries the `Secure` flag. Enable in production.
    #[serde(default)]
    pub cookie_secure: bool,
    /// Token and cookie lifetime in hours when "remember me" is not set.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
    /// Token and cookie lifetime in days when "remember me" is set.
    #[serde(default = "default_remember_ttl")]
    pub remember_me_ttl_days: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            cookie_secure: false,
            token_ttl_hours: default_token_ttl(),
            remember_me_ttl_days: default_remember_ttl(),
        }
    }
}

fn default_cookie_name() -> String {
    "auth_token".to_string()
}

fn default_token_ttl() -> u64 {
    24
}

fn default_remember_ttl() -> u64 {
    7
}
