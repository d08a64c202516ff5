//! Display models rendered by the dashboard template.

use chrono::{DateTime, Utc};

use crate::application::{CacheStatus, MappingListSnapshot, WorkflowState};
use crate::domain::entities::Mapping;

/// Placeholder for absent timestamps.
pub const MISSING_VALUE: &str = "N/A";

/// Formats a timestamp for display, or [`MISSING_VALUE`] when absent.
pub fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}

/// One row of a mapping listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRow {
    pub original_url: String,
    pub short_url: String,
    pub created_at: String,
    pub visits: u64,
    pub last_visited: String,
}

impl From<&Mapping> for MappingRow {
    fn from(mapping: &Mapping) -> Self {
        Self {
            original_url: mapping.original_url.clone(),
            short_url: mapping.short_url.clone(),
            created_at: format_timestamp(Some(mapping.created_at)),
            visits: mapping.visits,
            last_visited: format_timestamp(mapping.last_visited),
        }
    }
}

/// Panel of a workflow whose result is a URL.
#[derive(Debug, Clone, Default)]
pub struct UrlPanel {
    pub input_value: String,
    pub is_loading: bool,
    pub error: Option<String>,
    pub result: Option<String>,
}

impl From<WorkflowState<String>> for UrlPanel {
    fn from(state: WorkflowState<String>) -> Self {
        Self {
            error: state.error_message(),
            input_value: state.input_value,
            is_loading: state.is_loading,
            result: state.result,
        }
    }
}

/// Statistics panel.
#[derive(Debug, Clone, Default)]
pub struct StatisticsPanel {
    pub input_value: String,
    pub is_loading: bool,
    pub error: Option<String>,
    pub result: Option<MappingRow>,
}

impl From<WorkflowState<Mapping>> for StatisticsPanel {
    fn from(state: WorkflowState<Mapping>) -> Self {
        Self {
            error: state.error_message(),
            result: state.result.as_ref().map(MappingRow::from),
            input_value: state.input_value,
            is_loading: state.is_loading,
        }
    }
}

/// The "All URLs" listing.
#[derive(Debug, Clone)]
pub struct MappingList {
    pub rows: Vec<MappingRow>,
    pub is_loading: bool,
    /// Set when the rows shown are left over from before a failed refresh.
    pub stale_error: Option<String>,
}

impl From<MappingListSnapshot> for MappingList {
    fn from(snapshot: MappingListSnapshot) -> Self {
        let stale_error = match snapshot.status() {
            CacheStatus::Stale => snapshot.error.as_ref().map(ToString::to_string),
            _ => None,
        };

        Self {
            rows: snapshot.mappings.iter().map(MappingRow::from).collect(),
            is_loading: snapshot.is_loading,
            stale_error,
        }
    }
}
