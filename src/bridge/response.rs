//! `BusOutcome` → synchronous response.
//!
//! Terminal states, starting from the outcome:
//!
//! ```text
//! Published                → nothing written, caller continues
//! Replied, no override     → body only (default status); "" and "200" count as none
//! Replied, override "NNN"  → status NNN, then body
//! Replied, override junk   → nothing written, StatusParse error (1xx counts as junk)
//! Failed{NoResponders}     → 404, no body, error
//! Failed{Other}            → 500, no body, error
//! ```

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use super::config::SERVICE_ERROR_CODE_HEADER;
use super::dispatch::BusOutcome;
use super::error::BridgeError;

/// Where the translated response is written.
///
/// Callers must set the status before writing the body; implementations
/// are free to ignore a status that arrives after the body.
pub trait ResponseSink {
    fn set_status(&mut self, status: StatusCode);
    fn write_body(&mut self, body: Bytes) -> std::io::Result<()>;
}

/// Successful terminal state of a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseState {
    /// Nothing written; hand the request to the next stage
    Published,
    /// Reply body written under the default status
    Replied,
    /// Reply body written under the responder's status
    RepliedWithOverride(StatusCode),
}

/// Applies the status override policy and writes the reply.
#[derive(Debug, Clone)]
pub struct ResponseTranslator {
    status_header: String,
}

impl Default for ResponseTranslator {
    fn default() -> Self {
        Self::new(SERVICE_ERROR_CODE_HEADER)
    }
}

impl ResponseTranslator {
    pub fn new(status_header: impl Into<String>) -> Self {
        Self {
            status_header: status_header.into(),
        }
    }

    pub fn translate<S: ResponseSink>(
        &self,
        outcome: BusOutcome,
        sink: &mut S,
    ) -> Result<ResponseState, BridgeError> {
        match outcome {
            BusOutcome::Published => Ok(ResponseState::Published),
            BusOutcome::Failed { error, .. } => {
                let err = BridgeError::from_bus(error);
                if let Some(status) = err.kind().status() {
                    sink.set_status(status);
                }
                Err(err)
            }
            BusOutcome::Replied { payload, headers } => {
                let code = headers
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(&self.status_header))
                    .map(|(_, value)| value.as_str());

                let state = match code {
                    None | Some("") | Some("200") => ResponseState::Replied,
                    Some(value) => {
                        let status = parse_status(value)?;
                        sink.set_status(status);
                        ResponseState::RepliedWithOverride(status)
                    }
                };

                sink.write_body(payload).map_err(BridgeError::BodyWrite)?;
                Ok(state)
            }
        }
    }
}

/// Parse an override code. 1xx codes cannot be a final HTTP status, so they
/// are rejected like any other unusable value.
fn parse_status(value: &str) -> Result<StatusCode, BridgeError> {
    value
        .parse::<u16>()
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .filter(|status| !status.is_informational())
        .ok_or_else(|| BridgeError::StatusParse {
            value: value.to_string(),
        })
}

/// In-memory `ResponseSink` that becomes an axum `Response`.
#[derive(Debug, Default)]
pub struct BufferedResponse {
    status: Option<StatusCode>,
    body: Option<Bytes>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Whether anything (status or body) has been written.
    pub fn is_committed(&self) -> bool {
        self.status.is_some() || self.body.is_some()
    }
}

impl ResponseSink for BufferedResponse {
    fn set_status(&mut self, status: StatusCode) {
        if self.body.is_none() && self.status.is_none() {
            self.status = Some(status);
        }
    }

    fn write_body(&mut self, body: Bytes) -> std::io::Result<()> {
        self.body = Some(body);
        Ok(())
    }
}

impl IntoResponse for BufferedResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body.unwrap_or_default()));
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        response
    }
}
