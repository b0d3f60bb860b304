//! # hostel-api
//!
//! HTTP API layer for the hostel platform built on Axum.
//!
//! Provides the auth, account, and admin endpoints, the route gate
//! middleware, the session cookie carrier, extractors, DTOs, and error
//! mapping.

pub mod app;
pub mod cookie;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
