//! Bus - the publish/subscribe side of the bridge.
//!
//! The bridge never talks to a broker directly. It consumes the
//! `BusClient` trait, which a real broker connection (or the included
//! `InMemoryBus`) implements.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 BusClient                    │
//! │  publish(subject, payload)                   │
//! │  request(message, timeout) -> reply          │
//! └──────────────────────────────────────────────┘
//!          │                        │
//!          ▼                        ▼
//! ┌─────────────────┐      ┌─────────────────────┐
//! │  InMemoryBus    │      │  NATS connection    │
//! │  (included)     │      │  (external)         │
//! └─────────────────┘      └─────────────────────┘
//! ```

mod client;
mod in_memory;
mod message;

pub use client::BusClient;
pub use in_memory::InMemoryBus;
pub use message::{BusError, BusMessage};
