//! Shorten workflow: turns a long URL into a short one.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::state::{DispatchToken, WorkflowSlot, WorkflowState};
use crate::application::mapping_cache::MappingListCache;
use crate::domain::ShortenerGateway;
use crate::error::ClientError;

/// Message shown when the URL field is blank.
pub const EMPTY_URL_MESSAGE: &str = "Please enter a URL";

/// Submits URLs for shortening and refreshes the mapping list afterwards.
///
/// The service validates the URL itself; this workflow only rejects blank
/// input. A successful shorten always starts a background cache refresh
/// whose outcome does not affect this workflow's state.
pub struct ShortenWorkflow {
    gateway: Arc<dyn ShortenerGateway>,
    cache: Arc<MappingListCache>,
    slot: WorkflowSlot<String>,
}

impl ShortenWorkflow {
    pub fn new(gateway: Arc<dyn ShortenerGateway>, cache: Arc<MappingListCache>) -> Self {
        Self {
            gateway,
            cache,
            slot: WorkflowSlot::new(),
        }
    }

    pub fn state(&self) -> WorkflowState<String> {
        self.slot.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<WorkflowState<String>> {
        self.slot.subscribe()
    }

    /// Shortens `input` and waits for the service to answer.
    ///
    /// Returns the workflow state after this dispatch resolved. If a newer
    /// dispatch started meanwhile, that one's state is returned instead.
    pub async fn dispatch(&self, input: impl Into<String>) -> WorkflowState<String> {
        if let Some((token, url)) = self.start(input.into()) {
            self.finish(token, url).await;
        }
        self.state()
    }

    /// Validates `input`, enters `Pending` and completes in the background.
    ///
    /// Returns `None` when validation failed and nothing was sent.
    pub fn spawn_dispatch(self: &Arc<Self>, input: impl Into<String>) -> Option<JoinHandle<()>> {
        let (token, url) = self.start(input.into())?;
        let workflow = Arc::clone(self);
        Some(tokio::spawn(async move { workflow.finish(token, url).await }))
    }

    fn start(&self, input: String) -> Option<(DispatchToken, String)> {
        let url = input.trim().to_string();
        if url.is_empty() {
            self.slot
                .reject(input, ClientError::validation(EMPTY_URL_MESSAGE));
            return None;
        }
        Some((self.slot.begin(input), url))
    }

    async fn finish(&self, token: DispatchToken, url: String) {
        let outcome = self.gateway.shorten(&url).await;

        match &outcome {
            Ok(short_url) => {
                info!(%url, %short_url, "URL shortened");
                self.cache.spawn_refresh();
            }
            Err(e) => warn!(%url, error = %e, kind = e.kind(), "Shorten failed"),
        }

        self.slot.complete(token, outcome);
    }
}
