//! Per-workflow state and the dispatch bookkeeping shared by all workflows.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::debug;

use crate::error::ClientError;

/// Where a workflow is in its request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
    Resolved,
    Failed,
}

/// Observable state of one workflow.
///
/// After a resolution at most one of `error` and `result` is set. Starting a
/// new dispatch clears both before the request completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowState<T> {
    pub input_value: String,
    pub is_loading: bool,
    pub error: Option<ClientError>,
    pub result: Option<T>,
}

impl<T> Default for WorkflowState<T> {
    fn default() -> Self {
        Self {
            input_value: String::new(),
            is_loading: false,
            error: None,
            result: None,
        }
    }
}

impl<T> WorkflowState<T> {
    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Pending
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.result.is_some() {
            Phase::Resolved
        } else {
            Phase::Idle
        }
    }

    /// Message of the current error, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

/// Identifies one dispatch of a workflow.
///
/// Tokens increase monotonically per slot; only the latest one may write a
/// resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DispatchToken(u64);

/// Owns a [`WorkflowState`] and applies dispatches to it.
///
/// State changes are published through a `watch` channel so views can
/// subscribe instead of polling. A response whose token is no longer the
/// latest is dropped, so a slow earlier call never overwrites a later one.
#[derive(Debug)]
pub struct WorkflowSlot<T> {
    state: watch::Sender<WorkflowState<T>>,
    latest: AtomicU64,
}

impl<T> Default for WorkflowSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> WorkflowSlot<T> {
    pub fn new() -> Self {
        Self {
            state: watch::Sender::new(WorkflowState::default()),
            latest: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<WorkflowState<T>> {
        self.state.subscribe()
    }

    /// Starts a dispatch: records the input and enters `Pending`.
    pub fn begin(&self, input: String) -> DispatchToken {
        let mut token = DispatchToken(0);
        self.state.send_modify(|state| {
            token = DispatchToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1);
            state.input_value = input;
            state.is_loading = true;
            state.error = None;
            state.result = None;
        });
        token
    }

    /// Fails a dispatch before it reaches the network.
    ///
    /// Counts as a dispatch of its own, so any request still in flight is
    /// discarded when it lands.
    pub fn reject(&self, input: String, error: ClientError) {
        self.state.send_modify(|state| {
            self.latest.fetch_add(1, Ordering::SeqCst);
            state.input_value = input;
            state.is_loading = false;
            state.error = Some(error);
            state.result = None;
        });
    }

    /// Applies the outcome of the dispatch identified by `token`.
    ///
    /// Returns `false` without touching the state if a newer dispatch has
    /// started since.
    pub fn complete(&self, token: DispatchToken, outcome: Result<T, ClientError>) -> bool {
        self.state.send_if_modified(|state| {
            if self.latest.load(Ordering::SeqCst) != token.0 {
                debug!(token = token.0, "Discarding superseded response");
                return false;
            }

            state.is_loading = false;
            match outcome {
                Ok(value) => {
                    state.result = Some(value);
                    state.error = None;
                }
                Err(error) => {
                    state.error = Some(error);
                    state.result = None;
                }
            }
            true
        })
    }
}

impl<T: Clone> WorkflowSlot<T> {
    pub fn snapshot(&self) -> WorkflowState<T> {
        self.state.borrow().clone()
    }
}
