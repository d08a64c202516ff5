//! Contract with the external shortening service.

use crate::domain::entities::Mapping;
use crate::error::ClientError;
use async_trait::async_trait;

/// Every call the client makes to the shortening service.
///
/// Implementations hold no state between calls and never retry: a failed
/// call is reported once and the caller decides what to do with it.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpGateway`] - reqwest-backed implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortenerGateway: Send + Sync {
    /// Fetches every mapping known to the service, in service order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] on a failure status or network
    /// error. The error body of a failed list call is not inspected.
    async fn list_mappings(&self) -> Result<Vec<Mapping>, ClientError>;

    /// Asks the service to shorten `url` and returns the full short URL.
    ///
    /// The service validates the URL; callers only check it is not blank.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Service`] with the service's message when the
    /// failure body carries one, [`ClientError::Transport`] otherwise.
    async fn shorten(&self, url: &str) -> Result<String, ClientError>;

    /// Looks up the original URL behind a short code or short URL.
    ///
    /// # Errors
    ///
    /// Same contract as [`ShortenerGateway::shorten`].
    async fn decode(&self, short_code: &str) -> Result<String, ClientError>;

    /// Looks up the original URL with the intent of navigating to it.
    ///
    /// # Errors
    ///
    /// Same contract as [`ShortenerGateway::shorten`].
    async fn resolve(&self, short_code: &str) -> Result<String, ClientError>;

    /// Fetches a single mapping with its visit statistics.
    ///
    /// # Errors
    ///
    /// Same contract as [`ShortenerGateway::shorten`].
    async fn statistics(&self, short_code: &str) -> Result<Mapping, ClientError>;
}
