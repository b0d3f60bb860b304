//! Route definitions for the hostel platform HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. Every
//! request, including unrouted paths, passes the route gate first.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;
    let body_limit = server.body_limit_bytes;
    let timeout = Duration::from_secs(server.request_timeout_seconds);
    let cors = middleware::cors::build_cors_layer(&server.cors);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(account_routes())
        .merge(admin_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .fallback(handlers::not_found)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::gate::route_gate,
        ))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: login, logout, register, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/me", get(handlers::auth::me))
}

/// Account self-service endpoints
fn account_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/account/me",
            get(handlers::account::get_profile).put(handlers::account::update_profile),
        )
        .route(
            "/account/me/password",
            put(handlers::account::change_password),
        )
}

/// Admin account management
fn admin_routes() -> Router<AppState> {
    use handlers::admin::accounts;

    Router::new()
        .route(
            "/admin/accounts",
            get(accounts::list_accounts).post(accounts::create_account),
        )
        .route(
            "/admin/accounts/{id}",
            get(accounts::get_account).delete(accounts::delete_account),
        )
        .route("/admin/accounts/{id}/status", put(accounts::update_status))
}

/// Health check endpoint (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
