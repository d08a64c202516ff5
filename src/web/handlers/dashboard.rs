//! Dashboard page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use chrono::{Datelike, Utc};

use crate::state::AppState;
use crate::web::view::{MappingList, StatisticsPanel, UrlPanel};

/// Template for the dashboard page.
///
/// Renders `templates/dashboard.html` with:
/// - Shorten, decode and statistics panels
/// - The "All URLs" listing from the mapping list cache
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub shorten: UrlPanel,
    pub decode: UrlPanel,
    pub statistics: StatisticsPanel,
    pub list: MappingList,
    /// Reload the page while something is still pending.
    pub auto_refresh: bool,
    /// Copyright year in the footer.
    pub year: i32,
}

impl DashboardTemplate {
    /// Captures the current state of every controller.
    pub fn from_state(state: &AppState) -> Self {
        let shorten = UrlPanel::from(state.shorten.state());
        let decode = UrlPanel::from(state.decode.state());
        let statistics = StatisticsPanel::from(state.statistics.state());
        let list = MappingList::from(state.cache.snapshot());

        let auto_refresh =
            shorten.is_loading || decode.is_loading || statistics.is_loading || list.is_loading;

        Self {
            shorten,
            decode,
            statistics,
            list,
            auto_refresh,
            year: Utc::now().year(),
        }
    }
}

/// Renders the dashboard.
///
/// # Endpoint
///
/// `GET /`
pub async fn dashboard_handler(State(state): State<AppState>) -> impl IntoResponse {
    DashboardTemplate::from_state(&state)
}
