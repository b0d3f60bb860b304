//! Admin account management handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use hostel_core::types::{AccountId, PageRequest};

use crate::dto::request::{
    CreateAccountBody, DeleteAccountQuery, ListAccountsQuery, UpdateStatusRequest,
};
use crate::dto::response::{AccountResponse, ApiResponse, MessageResponse, PaginatedResponse};
use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::state::AppState;

/// GET /api/admin/accounts
pub async fn list_accounts(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<ListAccountsQuery>,
) -> ApiResult<Json<ApiResponse<PaginatedResponse<AccountResponse>>>> {
    let defaults = PageRequest::default();
    let page = PageRequest::new(
        query.page.unwrap_or(defaults.page),
        query.per_page.unwrap_or(defaults.page_size),
    );

    let result = state
        .admin_service
        .list(&auth, query.filter(), page)
        .await?;

    Ok(Json(ApiResponse::ok(PaginatedResponse::from_page(
        result,
        AccountResponse::from,
    ))))
}

/// POST /api/admin/accounts
pub async fn create_account(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateAccountBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AccountResponse>>)> {
    let account = state.admin_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(account.into()))))
}

/// GET /api/admin/accounts/{id}
pub async fn get_account(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<AccountId>,
) -> ApiResult<Json<ApiResponse<AccountResponse>>> {
    let account = state.admin_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(account.into())))
}

/// PUT /api/admin/accounts/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<AccountId>,
    ApiJson(req): ApiJson<UpdateStatusRequest>,
) -> ApiResult<Json<ApiResponse<AccountResponse>>> {
    let account = state.admin_service.set_status(&auth, id, req.status).await?;
    Ok(Json(ApiResponse::ok(account.into())))
}

/// DELETE /api/admin/accounts/{id}
pub async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<AccountId>,
    ApiQuery(query): ApiQuery<DeleteAccountQuery>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.admin_service.delete(&auth, id, query.hard).await?;
    let message = if query.hard {
        "Account permanently deleted"
    } else {
        "Account deleted"
    };
    Ok(Json(ApiResponse::ok(MessageResponse::new(message))))
}
