//! Route handlers organized by domain.

pub mod account;
pub mod admin;
pub mod auth;
pub mod health;

use axum::http::Uri;

use hostel_core::error::AppError;

use crate::error::ApiError;

/// Fallback for paths no route serves. Reached only after the gate has
/// allowed the request.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError(AppError::not_found(format!("No route for {}", uri.path())))
}
