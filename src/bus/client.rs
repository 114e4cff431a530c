//! The bus client capability consumed by the bridge.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use super::{BusError, BusMessage};

/// Trait for talking to a publish/subscribe bus.
///
/// The connection behind an implementation is long-lived and shared between
/// concurrent requests, so implementations must be safe to call from many
/// tasks at once. Reply correlation (inboxes, reply-to subjects) belongs to
/// the implementation.
///
/// Implementations might include:
/// - `InMemoryBus` - For testing and single-process scenarios
/// - a NATS connection wrapper
#[async_trait]
pub trait BusClient: Send + Sync {
    /// Fire-and-forget publish. Headers are never sent on this path.
    async fn publish(&self, subject: &str, payload: Bytes) -> Result<(), BusError>;

    /// Send `message` and wait up to `timeout` for exactly one reply.
    ///
    /// Must return `BusError::NoResponders` when nobody is subscribed to the
    /// subject, and `BusError::Timeout` when the deadline passes.
    async fn request(&self, message: BusMessage, timeout: Duration)
        -> Result<BusMessage, BusError>;
}
