//! Front-end route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    dashboard_handler, decode_handler, health_handler, redirect_handler, refresh_handler,
    shorten_handler, statistics_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Short codes shadowed by a front-end route.
pub const RESERVED_CODES: [&str; 6] = [
    "health",
    "shorten",
    "decode",
    "statistics",
    "refresh",
    "static",
];

/// All front-end routes, without static assets or middleware.
///
/// # Endpoints
///
/// - `GET /` - Dashboard
/// - `POST /shorten`, `POST /decode`, `POST /statistics` - Workflow dispatch
/// - `POST /refresh` - Mapping list refresh
/// - `GET /health` - Health report
/// - `GET /{code}` - Short link redirect, for any code not in [`RESERVED_CODES`]
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/shorten", post(shorten_handler))
        .route("/decode", post(decode_handler))
        .route("/statistics", post(statistics_handler))
        .route("/refresh", post(refresh_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
}
