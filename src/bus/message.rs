//! Bus message and error types shared by every `BusClient`.

use std::error::Error;
use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;

/// A message sent to, or received from, the bus.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BusMessage {
    /// Routing key the message is published or requested under
    pub subject: String,
    /// Raw payload bytes
    pub payload: Bytes,
    /// Ordered headers; a name may appear more than once
    pub headers: Vec<(String, String)>,
}

impl BusMessage {
    /// Create a message with no headers.
    pub fn new(subject: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            subject: subject.into(),
            payload: payload.into(),
            headers: Vec::new(),
        }
    }

    /// Append a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Get the payload as a string (if valid UTF-8).
    pub fn payload_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }
}

/// Error reported by a bus client.
#[derive(Debug, Error)]
pub enum BusError {
    /// No subscriber was listening on the requested subject
    #[error("no responders available for request")]
    NoResponders,
    /// No reply arrived within the deadline
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// The inbound request went away while the bus call was in flight
    #[error("request cancelled")]
    Cancelled,
    /// Connection to the bus failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    /// The bus rejected the message
    #[error("message rejected: {0}")]
    Rejected(String),
    /// Other error
    #[error("bus error: {0}")]
    Other(#[source] Box<dyn Error + Send + Sync>),
}
