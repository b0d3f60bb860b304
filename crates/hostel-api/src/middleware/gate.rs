//! Route gate middleware.
//!
//! Runs before every route. Browser navigations that are denied get a
//! `303 See Other`; API calls get a JSON 401 or 403.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::debug;

use hostel_auth::jwt::INVALID_TOKEN;
use hostel_auth::{DenyReason, GateDecision};
use hostel_core::error::AppError;

use crate::cookie::carried_token;
use crate::error::ApiError;
use crate::state::AppState;

/// Evaluates the gate and either forwards the request, with verified claims
/// in its extensions, or answers in place of the handler.
pub async fn route_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let token = carried_token(request.headers(), &state.session_config().cookie_name);

    match state.gate.evaluate(&path, token.as_deref()) {
        GateDecision::Allow(claims) => {
            if let Some(claims) = claims {
                request.extensions_mut().insert(claims);
            }
            next.run(request).await
        }
        GateDecision::Deny {
            reason,
            redirect_to,
        } => {
            debug!(path = %path, reason = %reason, "Route gate denied request");
            if state.gate.is_api(&path) {
                ApiError(denial_error(reason)).into_response()
            } else {
                Redirect::to(&redirect_to).into_response()
            }
        }
    }
}

fn denial_error(reason: DenyReason) -> AppError {
    match reason {
        DenyReason::MissingToken => AppError::authentication("Authentication required"),
        DenyReason::InvalidToken => AppError::authentication(INVALID_TOKEN),
        DenyReason::RoleMismatch => {
            AppError::authorization("Your role does not have access to this resource")
        }
    }
}
