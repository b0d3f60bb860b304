//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use hostel_core::config::AuthConfig;
use hostel_core::error::AppError;

use super::claims::Claims;
use super::encoder::validated_secret;

/// Message returned for every rejected token, whatever the cause.
pub const INVALID_TOKEN: &str = "Invalid or expired token";

/// Validates session tokens and recovers their claims.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let secret = validated_secret(config)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iat", "sub", "iss"]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Decodes and validates a token string.
    ///
    /// Malformed, forged, and expired tokens all fail with the same
    /// `Authentication` error; the cause is only logged.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "Token rejected");
                AppError::authentication(INVALID_TOKEN)
            })?
            .claims;

        // The library accepts a token during the second of `exp`.
        if claims.is_expired() {
            debug!(account_id = %claims.sub, "Token rejected: expired");
            return Err(AppError::authentication(INVALID_TOKEN));
        }

        Ok(claims)
    }
}
