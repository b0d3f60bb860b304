//! `AuthUser` extractor: resolves the caller from gate-verified claims or
//! the carried token, and re-checks the live account.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use hostel_auth::Claims;
use hostel_core::error::AppError;
use hostel_entity::account::Account;
use hostel_service::RequestContext;

use crate::cookie::carried_token;
use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated caller available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Request context for service calls.
    pub ctx: RequestContext,
    /// Verified token claims.
    pub claims: Claims,
    /// The caller's account as currently stored.
    pub account: Account,
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.ctx
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // The gate stores claims for every non-public path it lets through.
        let claims = match parts.extensions.get::<Claims>() {
            Some(claims) => claims.clone(),
            None => {
                let token = carried_token(&parts.headers, &state.session_config().cookie_name)
                    .ok_or_else(|| AppError::authentication("Authentication required"))?;
                state.sessions.resolve(&token)?
            }
        };

        let account = state.sessions.current_account(&claims).await?;
        let ctx = RequestContext::from(&claims);

        Ok(Self {
            ctx,
            claims,
            account,
        })
    }
}
