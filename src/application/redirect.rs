//! Redirect resolver for `/{code}` navigations.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::ShortenerGateway;

/// Route the resolver falls back to when a code cannot be resolved.
pub const HOME_ROUTE: &str = "/";

/// Where the browser should go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Full navigation to the original URL.
    External(String),
    /// Back to the home view.
    Home,
}

impl Navigation {
    pub fn location(&self) -> &str {
        match self {
            Self::External(url) => url,
            Self::Home => HOME_ROUTE,
        }
    }
}

/// Lifecycle of a [`RedirectResolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectState {
    /// No short code in the current route.
    Idle,
    /// Waiting for the service to resolve `code`.
    Resolving { code: String },
    /// Terminal: navigating to the original URL.
    Navigating { code: String, destination: String },
    /// Terminal: the code could not be resolved, navigating home instead.
    /// Failures are logged but never shown to the user.
    ReturnedHome { code: String },
}

impl RedirectState {
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Resolving { code }
            | Self::Navigating { code, .. }
            | Self::ReturnedHome { code } => Some(code),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Navigating { .. } | Self::ReturnedHome { .. })
    }
}

/// Resolves the short code of the current route and decides where to go.
///
/// The resolver runs again only when the code changes between activations,
/// mirroring a view that re-resolves when the route parameter changes
/// without a full reload.
pub struct RedirectResolver {
    gateway: Arc<dyn ShortenerGateway>,
    state: RedirectState,
}

impl RedirectResolver {
    pub fn new(gateway: Arc<dyn ShortenerGateway>) -> Self {
        Self {
            gateway,
            state: RedirectState::Idle,
        }
    }

    pub fn state(&self) -> &RedirectState {
        &self.state
    }

    /// Activates the resolver for the code in the current route.
    ///
    /// Returns `None` when there is nothing to do: no code, a blank code, or
    /// the same code as the previous activation.
    pub async fn activate(&mut self, code: Option<&str>) -> Option<Navigation> {
        let code = match code.map(str::trim) {
            Some(code) if !code.is_empty() => code,
            _ => {
                self.state = RedirectState::Idle;
                return None;
            }
        };

        if self.state.code() == Some(code) {
            return None;
        }

        self.state = RedirectState::Resolving {
            code: code.to_string(),
        };

        Some(self.resolve(code.to_string()).await)
    }

    async fn resolve(&mut self, code: String) -> Navigation {
        match self.gateway.resolve(&code).await {
            Ok(destination) => {
                info!(%code, %destination, "Redirecting short link");
                let navigation = Navigation::External(destination.clone());
                self.state = RedirectState::Navigating { code, destination };
                navigation
            }
            Err(e) => {
                error!(%code, error = %e, "Failed to resolve short link, returning home");
                self.state = RedirectState::ReturnedHome { code };
                Navigation::Home
            }
        }
    }
}
