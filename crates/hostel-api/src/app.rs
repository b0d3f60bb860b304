//! Application builder and server loop.

use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tracing::{error, info, warn};

use hostel_core::error::AppError;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Serves the application until a shutdown signal arrives.
///
/// In-flight requests get `server.shutdown_grace_seconds` to finish after
/// the signal; the caller closes the database pool afterwards.
pub async fn run_server(state: AppState) -> Result<(), AppError> {
    let server_config = state.config.server.clone();
    let addr = format!("{}:{}", server_config.host, server_config.port);
    let grace = Duration::from_secs(server_config.shutdown_grace_seconds);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(address = %addr, "Hostel platform server listening");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, build_app(state)).with_graceful_shutdown(async move {
        shutdown_signal().await;
        info!("Shutdown signal received, draining connections");
        let _ = shutdown_tx.send(true);
    });

    tokio::select! {
        result = async { server.await } => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = async {
            let _ = shutdown_rx.wait_for(|stopping| *stopping).await;
            tokio::time::sleep(grace).await;
        } => {
            warn!(
                grace_seconds = grace.as_secs(),
                "Shutdown grace period elapsed, dropping connections"
            );
        }
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
