//! `BridgeRequest` → bus call → `BusOutcome`.

use std::sync::Arc;

use bytes::Bytes;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::request::BridgeRequest;
use crate::bus::{BusClient, BusError, BusMessage};

/// Coarse classification of a failed bus call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NoResponders,
    Other,
}

impl FailureKind {
    /// Classify a bus error. `NoResponders` is the only distinguished case.
    pub fn of(error: &BusError) -> Self {
        match error {
            BusError::NoResponders => FailureKind::NoResponders,
            _ => FailureKind::Other,
        }
    }
}

/// Result of exactly one bus operation.
#[derive(Debug)]
pub enum BusOutcome {
    /// Fire-and-forget publish succeeded
    Published,
    /// A reply arrived
    Replied {
        payload: Bytes,
        headers: Vec<(String, String)>,
    },
    /// The bus call failed
    Failed { kind: FailureKind, error: BusError },
}

impl BusOutcome {
    pub fn failed(error: BusError) -> Self {
        BusOutcome::Failed {
            kind: FailureKind::of(&error),
            error,
        }
    }
}

/// Chooses publish or request/reply and issues the call.
///
/// At most one bus operation per request, never retried.
pub struct Dispatcher {
    client: Arc<dyn BusClient>,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn BusClient>) -> Self {
        Self { client }
    }

    /// Dispatch `request`, abandoning the bus call if `cancel` fires first.
    pub async fn dispatch(&self, request: BridgeRequest, cancel: &CancellationToken) -> BusOutcome {
        debug!(
            subject = %request.subject,
            with_reply = request.want_reply,
            timeout_ms = request.timeout.as_millis() as u64,
            "dispatching bus message"
        );

        tokio::select! {
            biased;
            _ = cancel.cancelled() => BusOutcome::failed(BusError::Cancelled),
            outcome = self.call(request) => outcome,
        }
    }

    async fn call(&self, request: BridgeRequest) -> BusOutcome {
        if !request.want_reply {
            return match self.client.publish(&request.subject, request.payload).await {
                Ok(()) => BusOutcome::Published,
                Err(err) => BusOutcome::failed(err),
            };
        }

        let message = request.headers.into_iter().fold(
            BusMessage::new(request.subject, request.payload),
            |message, (name, value)| message.with_header(name, value),
        );

        match self.client.request(message, request.timeout).await {
            Ok(reply) => BusOutcome::Replied {
                payload: reply.payload,
                headers: reply.headers,
            },
            Err(err) => BusOutcome::failed(err),
        }
    }
}
