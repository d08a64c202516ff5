//! reqwest-backed implementation of [`ShortenerGateway`].

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::envelope::{EncodeRequest, Envelope, error_message};
use crate::domain::ShortenerGateway;
use crate::domain::entities::Mapping;
use crate::error::ClientError;

/// Endpoints of the shortening service, relative to its base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    List,
    Shorten,
    Decode,
    Resolve,
    Statistics,
}

impl Operation {
    fn path(self) -> &'static str {
        match self {
            Self::List => "api/v1/shortner/list",
            Self::Shorten => "api/v1/shortner/encode",
            Self::Decode => "api/v1/shortner/decode",
            Self::Resolve => "api/v1/shortner/",
            Self::Statistics => "api/v1/shortner/statistics",
        }
    }

    /// Message reported when the service gives no usable explanation.
    fn failure_message(self) -> &'static str {
        match self {
            Self::List => "Failed to fetch URLs",
            Self::Shorten => "Failed to shorten URL",
            Self::Decode => "Failed to decode URL",
            Self::Resolve => "Failed to fetch redirect URL",
            Self::Statistics => "Failed to get URL statistics",
        }
    }

    /// Listing failures are always reported as transport errors.
    fn reads_error_body(self) -> bool {
        !matches!(self, Self::List)
    }

    fn name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Shorten => "shorten",
            Self::Decode => "decode",
            Self::Resolve => "resolve",
            Self::Statistics => "statistics",
        }
    }
}

/// HTTP gateway to the shortening service.
///
/// The base URL is injected at construction. Relative endpoint paths are
/// joined under it, so a base with a path prefix (`https://host/shortener/`)
/// works as well as a bare origin.
///
/// No timeout is configured: a call that never answers stays pending, which
/// the workflows surface as a persistent loading state.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    /// Creates a gateway with a default reqwest client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: Url) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(concat!("shortlink/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(client, base_url))
    }

    /// Creates a gateway around an existing client.
    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self {
            client,
            base_url: with_trailing_slash(base_url),
        }
    }

    /// Base URL every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, operation: Operation) -> Result<Url, ClientError> {
        self.base_url.join(operation.path()).map_err(|e| {
            ClientError::transport(format!("Invalid endpoint for {}: {e}", operation.name()))
        })
    }

    fn lookup(&self, operation: Operation, short_code: &str) -> Result<RequestBuilder, ClientError> {
        Ok(self
            .client
            .get(self.endpoint(operation)?)
            .query(&[("shortUrl", short_code)]))
    }

    /// Sends the request and unwraps the `data` field of the response.
    ///
    /// Returns `Ok(None)` when a successful response has no `data`.
    async fn call<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<Option<T>, ClientError> {
        debug!(operation = operation.name(), "Calling shortening service");

        let response = request.send().await.map_err(|e| {
            warn!(operation = operation.name(), error = %e, "Shortening service unreachable");
            ClientError::transport(operation.failure_message())
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            warn!(operation = operation.name(), error = %e, "Failed to read response body");
            ClientError::transport(operation.failure_message())
        })?;

        if !status.is_success() {
            debug!(operation = operation.name(), %status, "Shortening service returned failure");
            let message = operation
                .reads_error_body()
                .then(|| error_message(&body))
                .flatten();

            return Err(match message {
                Some(message) => ClientError::Service(message),
                None => ClientError::transport(operation.failure_message()),
            });
        }

        let envelope: Envelope<T> = serde_json::from_slice(&body).map_err(|e| {
            warn!(operation = operation.name(), error = %e, "Malformed service response");
            ClientError::service(format!("Malformed response from shortening service: {e}"))
        })?;

        match (envelope.data, envelope.error) {
            (Some(data), _) => Ok(Some(data)),
            (None, Some(message)) if !message.is_empty() => Err(ClientError::Service(message)),
            (None, _) => Ok(None),
        }
    }

    async fn call_required<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        self.call(operation, request).await?.ok_or_else(|| {
            ClientError::service("Malformed response from shortening service: missing data")
        })
    }
}

#[async_trait]
impl ShortenerGateway for HttpGateway {
    async fn list_mappings(&self) -> Result<Vec<Mapping>, ClientError> {
        let request = self.client.get(self.endpoint(Operation::List)?);
        let mappings = self.call(Operation::List, request).await?;
        Ok(mappings.unwrap_or_default())
    }

    async fn shorten(&self, url: &str) -> Result<String, ClientError> {
        let request = self
            .client
            .post(self.endpoint(Operation::Shorten)?)
            .json(&EncodeRequest { url });
        self.call_required(Operation::Shorten, request).await
    }

    async fn decode(&self, short_code: &str) -> Result<String, ClientError> {
        let request = self.lookup(Operation::Decode, short_code)?;
        self.call_required(Operation::Decode, request).await
    }

    async fn resolve(&self, short_code: &str) -> Result<String, ClientError> {
        let request = self.lookup(Operation::Resolve, short_code)?;
        self.call_required(Operation::Resolve, request).await
    }

    async fn statistics(&self, short_code: &str) -> Result<Mapping, ClientError> {
        let request = self.lookup(Operation::Statistics, short_code)?;
        self.call_required(Operation::Statistics, request).await
    }
}

/// Appends a `/` to the base path so `Url::join` keeps the last segment.
pub fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(base: &str) -> HttpGateway {
        HttpGateway::new(Url::parse(base).unwrap()).unwrap()
    }

    #[test]
    fn test_endpoints_join_under_base() {
        let gateway = gateway("http://localhost:7000/");

        assert_eq!(
            gateway.endpoint(Operation::List).unwrap().as_str(),
            "http://localhost:7000/api/v1/shortner/list"
        );
        assert_eq!(
            gateway.endpoint(Operation::Resolve).unwrap().as_str(),
            "http://localhost:7000/api/v1/shortner/"
        );
    }

    #[test]
    fn test_base_with_prefix_keeps_prefix() {
        let gateway = gateway("https://example.com/shortener");

        assert_eq!(gateway.base_url().as_str(), "https://example.com/shortener/");
        assert_eq!(
            gateway.endpoint(Operation::Shorten).unwrap().as_str(),
            "https://example.com/shortener/api/v1/shortner/encode"
        );
    }

    #[test]
    fn test_lookup_encodes_short_code() {
        let gateway = gateway("http://localhost:7000/");
        let request = gateway
            .lookup(Operation::Decode, "a b&c=d")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "http://localhost:7000/api/v1/shortner/decode?shortUrl=a+b%26c%3Dd"
        );
    }

    #[test]
    fn test_only_list_ignores_error_body() {
        assert!(!Operation::List.reads_error_body());
        assert!(Operation::Shorten.reads_error_body());
        assert!(Operation::Statistics.reads_error_body());
    }
}
