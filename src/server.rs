//! HTTP server initialization and runtime setup.
//!
//! Builds the service gateway, loads the mapping list once and runs the
//! Axum front-end until Ctrl-C.

use crate::config::Config;
use crate::infrastructure::http::HttpGateway;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the web front-end with the given configuration.
///
/// Initializes:
/// - HTTP gateway to the shortening service
/// - Workflows and the mapping list cache
/// - Initial mapping list load (in the background)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let gateway = HttpGateway::new(config.api_base_url.clone())
        .context("Failed to create shortening service gateway")?;
    tracing::info!("Using shortening service at {}", gateway.base_url());

    let state = AppState::new(Arc::new(gateway));
    let cache = state.cache.clone();
    tokio::spawn(async move { cache.initial_load().await });

    let app = app_router(state, &config.static_dir);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
