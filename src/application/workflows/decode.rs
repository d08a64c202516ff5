//! Decode workflow: looks up the original URL behind a short code.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::state::{DispatchToken, WorkflowSlot, WorkflowState};
use crate::application::mapping_cache::MappingListCache;
use crate::domain::ShortenerGateway;
use crate::error::ClientError;

/// Message shown when the short code field is blank.
pub const EMPTY_CODE_MESSAGE: &str = "Please enter your short code";

/// Resolves short codes (or full short URLs) to their original URL.
///
/// Like [`super::ShortenWorkflow`], a successful decode refreshes the mapping
/// list in the background.
pub struct DecodeWorkflow {
    gateway: Arc<dyn ShortenerGateway>,
    cache: Arc<MappingListCache>,
    slot: WorkflowSlot<String>,
}

impl DecodeWorkflow {
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

    pub async fn dispatch(&self, input: impl Into<String>) -> WorkflowState<String> {
        if let Some((token, code)) = self.start(input.into()) {
            self.finish(token, code).await;
        }
        self.state()
    }

    pub fn spawn_dispatch(self: &Arc<Self>, input: impl Into<String>) -> Option<JoinHandle<()>> {
        let (token, code) = self.start(input.into())?;
        let workflow = Arc::clone(self);
        Some(tokio::spawn(async move { workflow.finish(token, code).await }))
    }

    fn start(&self, input: String) -> Option<(DispatchToken, String)> {
        let code = input.trim().to_string();
        if code.is_empty() {
            self.slot
                .reject(input, ClientError::validation(EMPTY_CODE_MESSAGE));
            return None;
        }
        Some((self.slot.begin(input), code))
    }

    async fn finish(&self, token: DispatchToken, code: String) {
        let outcome = self.gateway.decode(&code).await;

        match &outcome {
            Ok(original_url) => {
                debug!(%code, %original_url, "Short code decoded");
                self.cache.spawn_refresh();
            }
            Err(e) => warn!(%code, error = %e, kind = e.kind(), "Decode failed"),
        }

        self.slot.complete(token, outcome);
    }
}
