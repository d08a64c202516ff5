//! Form handlers that dispatch workflows.
//!
//! Every handler starts its workflow in the background and answers with
//! `303 See Other` to the dashboard, which renders the pending state. A slow
//! or hung service call therefore never blocks the page.

use axum::{Form, extract::State, response::Redirect};

use crate::application::redirect::HOME_ROUTE;
use crate::state::AppState;
use crate::web::dto::forms::WorkflowForm;

/// `POST /shorten`
pub async fn shorten_handler(
    State(state): State<AppState>,
    Form(form): Form<WorkflowForm>,
) -> Redirect {
    state.shorten.spawn_dispatch(form.value);
    Redirect::to(HOME_ROUTE)
}

/// `POST /decode`
pub async fn decode_handler(
    State(state): State<AppState>,
    Form(form): Form<WorkflowForm>,
) -> Redirect {
    state.decode.spawn_dispatch(form.value);
    Redirect::to(HOME_ROUTE)
}

/// `POST /statistics`
pub async fn statistics_handler(
    State(state): State<AppState>,
    Form(form): Form<WorkflowForm>,
) -> Redirect {
    state.statistics.spawn_dispatch(form.value);
    Redirect::to(HOME_ROUTE)
}

/// `POST /refresh`
pub async fn refresh_handler(State(state): State<AppState>) -> Redirect {
    state.cache.spawn_refresh();
    Redirect::to(HOME_ROUTE)
}
