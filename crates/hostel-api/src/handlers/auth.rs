//! Auth handlers: login, logout, register, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use crate::cookie::{cleared_cookie, session_cookie};
use crate::dto::request::{CreateAccountBody, LoginRequest};
use crate::dto::response::{
    AccountResponse, ApiResponse, LoginResponse, MeResponse, MessageResponse,
};
use crate::error::ApiResult;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<ApiResponse<LoginResponse>>)> {
    let outcome = state
        .sessions
        .login(&req.email, &req.password, req.remember_me)
        .await?;

    let cookie = session_cookie(state.session_config(), &outcome.token);
    let redirect_to = state
        .gate
        .routes_for(outcome.account.role())
        .home
        .clone();

    let body = LoginResponse {
        user: AccountResponse::from(outcome.account),
        token: outcome.token.token,
        expires_at: outcome.token.expires_at,
        redirect_to,
    };

    Ok((jar.add(cookie), Json(ApiResponse::ok(body))))
}

/// POST /api/auth/logout
///
/// Always answers with the same cleared cookie, signed in or not.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<MessageResponse>>) {
    let jar = jar.add(cleared_cookie(state.session_config()));
    (jar, Json(ApiResponse::ok(MessageResponse::new("Logged out"))))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateAccountBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AccountResponse>>)> {
    let account = state.account_service.register(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(AccountResponse::from(account))),
    ))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<ApiResponse<MeResponse>> {
    let claims = &auth.claims;
    let issued_at = chrono::DateTime::from_timestamp(claims.iat, 0).unwrap_or_default();

    Json(ApiResponse::ok(MeResponse {
        account_id: claims.sub,
        role: claims.role,
        email: claims.email.clone(),
        issued_at,
        expires_at: claims.expires_at(),
        account: AccountResponse::from(auth.account),
    }))
}
