//! Handler for short link navigation.

use axum::{
    extract::{Path, State},
    http::HeaderValue,
    response::Redirect,
};
use tracing::error;

use crate::application::{Navigation, RedirectResolver};
use crate::state::AppState;

/// Sends the browser to the original URL behind `code`.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Behaviour
///
/// - Resolved code: `307 Temporary Redirect` to the original URL
/// - Any failure: `307 Temporary Redirect` to `/`; the error is only logged
/// - A destination that cannot be sent as a `Location` header counts as a
///   failure
///
/// # Reserved codes
///
/// Codes equal to a front-end route (`health`, `shorten`, `decode`,
/// `statistics`, `refresh`, `static`) are served by that route and never
/// reach this handler. See [`crate::web::routes::RESERVED_CODES`].
///
/// Each request is a fresh navigation, so a new resolver is activated per
/// request.
pub async fn redirect_handler(State(state): State<AppState>, Path(code): Path<String>) -> Redirect {
    let mut resolver = RedirectResolver::new(state.gateway.clone());
    let navigation = match resolver.activate(Some(&code)).await {
        Some(Navigation::External(destination))
            if HeaderValue::from_str(&destination).is_err() =>
        {
            error!(%code, "Destination is not a valid Location header, returning home");
            Navigation::Home
        }
        Some(navigation) => navigation,
        None => Navigation::Home,
    };

    Redirect::temporary(navigation.location())
}
