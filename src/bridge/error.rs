//! Bridge errors and the status policy attached to them.

use axum::http::StatusCode;
use thiserror::Error;

use super::dispatch::FailureKind;
use crate::bus::BusError;

/// Error type for a single bridged request.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The inbound body could not be read; nothing was dispatched.
    #[error("failed to read request body: {0}")]
    BodyRead(#[source] axum::Error),
    /// Subject resolution produced an empty subject; nothing was dispatched.
    #[error("resolved subject is empty")]
    EmptySubject,
    /// Nobody answered the request.
    #[error("no responders: {0}")]
    NoResponders(#[source] BusError),
    /// Any other bus failure, including deadline expiry and cancellation.
    #[error("bus call failed: {0}")]
    Bus(#[source] BusError),
    /// The service status header did not hold a usable status code.
    #[error("invalid service status code {value:?}")]
    StatusParse { value: String },
    /// Writing the response body failed after the status was committed.
    #[error("failed to write response body: {0}")]
    BodyWrite(#[source] std::io::Error),
}

/// Failure taxonomy for bridged requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BodyRead,
    EmptySubject,
    NoResponders,
    BusTimeoutOrOther,
    StatusParse,
    BodyWrite,
}

impl ErrorKind {
    /// Status the bridge itself commits for this kind, if any.
    pub fn status(self) -> Option<StatusCode> {
        match self {
            ErrorKind::NoResponders => Some(StatusCode::NOT_FOUND),
            ErrorKind::BusTimeoutOrOther => Some(StatusCode::INTERNAL_SERVER_ERROR),
            ErrorKind::BodyRead
            | ErrorKind::EmptySubject
            | ErrorKind::StatusParse
            | ErrorKind::BodyWrite => None,
        }
    }

    /// Status a caller answers with when the bridge committed nothing.
    pub fn fallback_status(self) -> StatusCode {
        self.status().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl BridgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::BodyRead(_) => ErrorKind::BodyRead,
            BridgeError::EmptySubject => ErrorKind::EmptySubject,
            BridgeError::NoResponders(_) => ErrorKind::NoResponders,
            BridgeError::Bus(_) => ErrorKind::BusTimeoutOrOther,
            BridgeError::StatusParse { .. } => ErrorKind::StatusParse,
            BridgeError::BodyWrite(_) => ErrorKind::BodyWrite,
        }
    }

    /// Map a bus failure onto the taxonomy.
    pub fn from_bus(err: BusError) -> Self {
        match FailureKind::of(&err) {
            FailureKind::NoResponders => BridgeError::NoResponders(err),
            FailureKind::Other => BridgeError::Bus(err),
        }
    }
}
