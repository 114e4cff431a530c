//! In-memory bus for testing and single-process scenarios.
//!
//! Records every publish and request, and answers requests through
//! responders registered per subject:
//! - a subject with no responder fails with `NoResponders`
//! - a responder returning `None` stalls until the request times out
//! - `fail_next()` makes the next call fail with the given error

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::{Mutex, RwLock};

use super::{BusClient, BusError, BusMessage};

type Responder = Arc<dyn Fn(&BusMessage) -> Option<BusMessage> + Send + Sync>;

/// In-memory bus client.
///
/// Cheap to clone; clones share the same log and responders.
///
/// ## Example
///
/// ```
/// use bus_bridge::bus::{BusMessage, InMemoryBus};
///
/// let bus = InMemoryBus::new();
/// bus.respond("svc.echo", |req| Some(BusMessage::new("", req.payload.clone())));
/// assert!(bus.published().is_empty());
/// ```
#[derive(Clone, Default)]
pub struct InMemoryBus {
    /// Published messages, in order
    published: Arc<RwLock<Vec<BusMessage>>>,
    /// Request messages, in order
    requests: Arc<RwLock<Vec<BusMessage>>>,
    /// Responder per subject
    responders: Arc<RwLock<HashMap<String, Responder>>>,
    /// Failure injected into the next call
    fail_next: Arc<Mutex<Option<BusError>>>,
}

impl InMemoryBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a responder for `subject`, replacing any previous one.
    pub fn respond<F>(&self, subject: &str, responder: F)
    where
        F: Fn(&BusMessage) -> Option<BusMessage> + Send + Sync + 'static,
    {
        self.responders
            .write()
            .insert(subject.to_string(), Arc::new(responder));
    }

    /// Register a responder that never answers.
    pub fn stall(&self, subject: &str) {
        self.respond(subject, |_| None);
    }

    /// Make the next publish or request fail with `error`.
    pub fn fail_next(&self, error: BusError) {
        *self.fail_next.lock() = Some(error);
    }

    /// All published messages.
    pub fn published(&self) -> Vec<BusMessage> {
        self.published.read().clone()
    }

    /// All request messages.
    pub fn requests(&self) -> Vec<BusMessage> {
        self.requests.read().clone()
    }

    /// Clear recorded traffic (responders are kept).
    pub fn clear(&self) {
        self.published.write().clear();
        self.requests.write().clear();
    }

    fn take_failure(&self) -> Option<BusError> {
        self.fail_next.lock().take()
    }
}

#[async_trait]
impl BusClient for InMemoryBus {
    async fn publish(&self, subject: &str, payload: Bytes) -> Result<(), BusError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        self.published.write().push(BusMessage::new(subject, payload));
        Ok(())
    }

    async fn request(
        &self,
        message: BusMessage,
        timeout: Duration,
    ) -> Result<BusMessage, BusError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        self.requests.write().push(message.clone());

        let responder = self.responders.read().get(&message.subject).cloned();
        let Some(responder) = responder else {
            return Err(BusError::NoResponders);
        };

        match responder(&message) {
            Some(reply) => Ok(reply),
            None => {
                tokio::time::sleep(timeout).await;
                Err(BusError::Timeout(timeout))
            }
        }
    }
}
