//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`            - Dashboard (workflow panels and mapping list)
//! - `POST /shorten`     - Dispatch the shorten workflow
//! - `POST /decode`      - Dispatch the decode workflow
//! - `POST /statistics`  - Dispatch the statistics workflow
//! - `POST /refresh`     - Refresh the mapping list
//! - `GET  /health`      - Front-end and service health
//! - `GET  /{code}`      - Short link redirect
//! - `/static/*`         - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::state::AppState;
use crate::web;
use crate::web::middleware::tracing;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared controllers injected into all handlers
/// - `static_dir` - directory served under `/static`
pub fn app_router(state: AppState, static_dir: &str) -> NormalizePath<Router> {
    let router = web::routes::routes()
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
