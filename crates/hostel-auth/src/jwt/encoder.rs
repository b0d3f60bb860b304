//! JWT token creation with configurable signing and lifetime.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use tracing::info;

use hostel_core::config::{AuthConfig, MIN_SECRET_LENGTH, SessionConfig};
use hostel_core::error::AppError;
use hostel_core::types::AccountId;
use hostel_entity::account::Role;

use super::claims::Claims;

/// Creates signed session tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Issuer written into every token.
    issuer: String,
    /// Default lifetime.
    ttl: Duration,
    /// Lifetime when "remember me" was requested.
    remember_me_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("ttl", &self.ttl)
            .field("remember_me_ttl", &self.remember_me_ttl)
            .finish()
    }
}

/// A freshly signed token and its lifetime.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact JWS string.
    pub token: String,
    /// The claims that were signed.
    pub claims: Claims,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
    /// Lifetime, used as the cookie max-age.
    pub max_age: Duration,
}

impl JwtEncoder {
    /// Creates a new encoder from configuration.
    ///
    /// Fails with a `Configuration` error when the secret is unset or shorter
    /// than [`MIN_SECRET_LENGTH`].
    pub fn new(auth: &AuthConfig, session: &SessionConfig) -> Result<Self, AppError> {
        let secret = validated_secret(auth)?;
        let ttl = lifetime_from(session.token_ttl_hours, Duration::try_hours)
            .ok_or_else(|| AppError::configuration("session.token_ttl_hours is out of range"))?;
        let remember_me_ttl = lifetime_from(session.remember_me_ttl_days, Duration::try_days)
            .ok_or_else(|| {
                AppError::configuration("session.remember_me_ttl_days is out of range")
            })?;

        info!(
            issuer = %auth.issuer,
            ttl_hours = ttl.num_hours(),
            remember_me_days = remember_me_ttl.num_days(),
            "Token issuer initialized"
        );

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            issuer: auth.issuer.clone(),
            ttl,
            remember_me_ttl,
        })
    }

    /// Lifetime of a token for the given "remember me" choice.
    pub fn lifetime(&self, remember_me: bool) -> Duration {
        if remember_me {
            self.remember_me_ttl
        } else {
            self.ttl
        }
    }

    /// Issues a token for an account.
    pub fn issue(
        &self,
        account_id: AccountId,
        role: Role,
        email: &str,
        remember_me: bool,
    ) -> Result<IssuedToken, AppError> {
        self.issue_at(account_id, role, email, remember_me, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        account_id: AccountId,
        role: Role,
        email: &str,
        remember_me: bool,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let max_age = self.lifetime(remember_me);
        let expires_at = now + max_age;

        let claims = Claims {
            sub: account_id,
            role,
            email: email.to_string(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        Ok(IssuedToken {
            token,
            claims,
            expires_at,
            max_age,
        })
    }
}

fn lifetime_from(value: u64, unit: fn(i64) -> Option<Duration>) -> Option<Duration> {
    i64::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .and_then(unit)
}

/// Returns the trimmed signing secret, or a fatal configuration error.
pub(crate) fn validated_secret(auth: &AuthConfig) -> Result<&str, AppError> {
    let secret = auth.jwt_secret.trim();
    if secret.is_empty() {
        return Err(AppError::configuration(
            "Token signing secret is not configured",
        ));
    }
    if secret.len() < MIN_SECRET_LENGTH {
        return Err(AppError::configuration(format!(
            "Token signing secret must be at least {MIN_SECRET_LENGTH} characters long"
        )));
    }
    Ok(secret)
}
