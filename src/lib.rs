//! bus_bridge - bridge synchronous HTTP requests onto a publish/subscribe bus.
//!
//! A `Bridge` turns each inbound request into exactly one bus operation:
//! a fire-and-forget publish (after which the request continues down the
//! HTTP pipeline) or a request/reply whose reply becomes the response.
//! Replies may carry a `Nats-Service-Error-Code` header to choose the
//! response status.

mod bridge;
pub mod bus;
pub mod http;

pub use bridge::{
    collect_single_valued_headers, Bridge, BridgeError, BridgeRequest, BufferedResponse,
    BusOutcome, ConfigError, Dispatcher, ErrorKind, FailureKind, Handled, PublishConfig,
    RequestTranslator, ResponseSink, ResponseState, ResponseTranslator, SubjectResolver,
    Verbatim, DEFAULT_TIMEOUT_MS, SERVICE_ERROR_CODE_HEADER,
};
