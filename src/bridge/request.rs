//! Inbound request → `BridgeRequest`.

use std::collections::BTreeMap;
use std::time::Duration;

use axum::body::Body;
use axum::http::HeaderMap;
use bytes::Bytes;

use super::config::PublishConfig;
use super::error::BridgeError;

/// A normalized request, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeRequest {
    /// Concrete, non-empty subject
    pub subject: String,
    /// Entire inbound body
    pub payload: Bytes,
    /// One value per header name
    pub headers: BTreeMap<String, String>,
    /// Request/reply instead of publish
    pub want_reply: bool,
    /// Reply deadline
    pub timeout: Duration,
}

/// Builds `BridgeRequest`s. `want_reply` and `timeout` come from config,
/// never from the request.
#[derive(Debug, Clone)]
pub struct RequestTranslator {
    want_reply: bool,
    timeout: Duration,
}

impl RequestTranslator {
    pub fn new(config: &PublishConfig) -> Self {
        Self {
            want_reply: config.with_reply,
            timeout: config.effective_timeout(),
        }
    }

    /// Translate an already-resolved subject plus the inbound headers and
    /// body. The body is consumed here and dropped on every path.
    pub async fn translate(
        &self,
        subject: String,
        headers: &HeaderMap,
        body: Body,
    ) -> Result<BridgeRequest, BridgeError> {
        if subject.is_empty() {
            return Err(BridgeError::EmptySubject);
        }

        let payload = axum::body::to_bytes(body, usize::MAX)
            .await
            .map_err(BridgeError::BodyRead)?;

        Ok(BridgeRequest {
            subject,
            payload,
            headers: collect_single_valued_headers(headers),
            want_reply: self.want_reply,
            timeout: self.timeout,
        })
    }
}

/// Collapse a multi-valued header map to its first value per name.
///
/// This is lossy on purpose: later values of a repeated header are
/// dropped. Names come out as the transport stores them (lowercase for
/// `http`). Values that are not valid UTF-8 are converted lossily.
pub fn collect_single_valued_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .keys()
        .filter_map(|name| {
            headers.get(name).map(|value| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
        })
        .collect()
}
