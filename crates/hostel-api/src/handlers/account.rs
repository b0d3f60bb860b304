//! Account self-service handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::request::{ChangePasswordRequest, UpdateProfileRequest};
use crate::dto::response::{AccountResponse, ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// GET /api/account/me
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<AccountResponse>>> {
    let account = state.account_service.get_profile(&auth).await?;
    Ok(Json(ApiResponse::ok(account.into())))
}

/// PUT /api/account/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> ApiResult<Json<ApiResponse<AccountResponse>>> {
    let account = state
        .account_service
        .update_profile(&auth, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(account.into())))
}

/// PUT /api/account/me/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<ChangePasswordRequest>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state
        .account_service
        .change_password(&auth, &req.current_password, &req.new_password)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Password changed"))))
}
