//! Error taxonomy shared by the gateway, the workflows and the cache.
//!
//! The `Display` output of every variant is the exact message shown to the
//! user, so views can render `error.to_string()` directly.

use thiserror::Error;

/// Failure of a single client operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// A client-side precondition failed; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// The service was unreachable, or answered with a failure status and no
    /// usable error body.
    #[error("{0}")]
    Transport(String),

    /// The service reported an error (`{"error": "..."}`) or sent a payload
    /// that could not be parsed.
    #[error("{0}")]
    Service(String),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn service(message: impl Into<String>) -> Self {
        Self::Service(message.into())
    }

    /// Stable machine-readable name of the variant, used in logs and JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Transport(_) => "transport_error",
            Self::Service(_) => "service_error",
        }
    }

    /// Returns true if the failure never left the client.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
