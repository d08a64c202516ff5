//! Statistics workflow: fetches one mapping with its visit counters.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

use super::state::{DispatchToken, WorkflowSlot, WorkflowState};
use crate::domain::ShortenerGateway;
use crate::domain::entities::Mapping;
use crate::error::ClientError;

/// Shortest query the statistics lookup accepts.
pub const MIN_QUERY_LEN: usize = 3;

/// Message shown when the query is too short.
pub const SHORT_QUERY_MESSAGE: &str = "Search query must be at least 3 characters";

/// Looks up visit statistics for a short code. Read-only: the mapping list
/// is left alone.
pub struct StatisticsWorkflow {
    gateway: Arc<dyn ShortenerGateway>,
    slot: WorkflowSlot<Mapping>,
}

impl StatisticsWorkflow {
    pub fn new(gateway: Arc<dyn ShortenerGateway>) -> Self {
        Self {
            gateway,
            slot: WorkflowSlot::new(),
        }
    }

    /// Whether a lookup for `query` may be dispatched.
    ///
    /// A query that fails this check is rejected by [`Self::dispatch`]
    /// without a request.
    pub fn can_dispatch(query: &str) -> bool {
        query.trim().chars().count() >= MIN_QUERY_LEN
    }

    pub fn state(&self) -> WorkflowState<Mapping> {
        self.slot.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<WorkflowState<Mapping>> {
        self.slot.subscribe()
    }

    pub async fn dispatch(&self, input: impl Into<String>) -> WorkflowState<Mapping> {
        if let Some((token, query)) = self.start(input.into()) {
            self.finish(token, query).await;
        }
        self.state()
    }

    pub fn spawn_dispatch(self: &Arc<Self>, input: impl Into<String>) -> Option<JoinHandle<()>> {
        let (token, query) = self.start(input.into())?;
        let workflow = Arc::clone(self);
        Some(tokio::spawn(async move { workflow.finish(token, query).await }))
    }

    fn start(&self, input: String) -> Option<(DispatchToken, String)> {
        if !Self::can_dispatch(&input) {
            self.slot
                .reject(input, ClientError::validation(SHORT_QUERY_MESSAGE));
            return None;
        }
        let query = input.trim().to_string();
        Some((self.slot.begin(input), query))
    }

    async fn finish(&self, token: DispatchToken, query: String) {
        let outcome = self.gateway.statistics(&query).await;
        if let Err(e) = &outcome {
            warn!(%query, error = %e, kind = e.kind(), "Statistics lookup failed");
        }
        self.slot.complete(token, outcome);
    }
}
