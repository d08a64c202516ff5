//! JSON envelopes used by the shortening service.

use serde::{Deserialize, Serialize};

/// Response body of every service endpoint.
///
/// Successful calls carry `data`; failures carry `error`. Both fields are
/// optional on the wire and the caller decides what a missing field means.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub error: Option<String>,
}

/// Body of the encode request.
#[derive(Debug, Serialize)]
pub struct EncodeRequest<'a> {
    pub url: &'a str,
}

/// Extracts the `error` message from a failure body, if it has one.
pub fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<Envelope<serde_json::Value>>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .filter(|message| !message.is_empty())
}
