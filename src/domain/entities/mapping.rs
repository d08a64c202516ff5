//! Mapping entity as reported by the shortening service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A short link and the address it points to.
///
/// Mappings are owned by the service. The client only reads them: it never
/// edits one locally and never relies on `short_url` being unique in what it
/// has cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    pub original_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub visits: u64,
    #[serde(default)]
    pub last_visited: Option<DateTime<Utc>>,
}

impl Mapping {
    /// Creates a mapping that has never been visited.
    pub fn new(
        original_url: impl Into<String>,
        short_url: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            original_url: original_url.into(),
            short_url: short_url.into(),
            created_at,
            visits: 0,
            last_visited: None,
        }
    }

    /// Returns true if the service has recorded at least one redirect.
    pub fn was_visited(&self) -> bool {
        self.last_visited.is_some()
    }
}
