//! Form payloads posted by the dashboard.

use serde::Deserialize;

/// Single-field form shared by the three workflow panels.
///
/// A missing field is treated as empty input so the workflow reports its own
/// validation message instead of the request being rejected.
#[derive(Debug, Default, Deserialize)]
pub struct WorkflowForm {
    #[serde(default)]
    pub value: String,
}
