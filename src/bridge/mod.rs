//! Bridge - translates one inbound HTTP request into one bus operation.
//!
//! ```text
//! request ─▶ RequestTranslator ─▶ Dispatcher ─▶ BusClient
//!                                                  │
//! response ◀─ ResponseTranslator ◀─ BusOutcome ◀───┘
//! ```
//!
//! The fire-and-forget success path is the only one on which the bridge
//! does not answer itself: the request is handed back to the caller to run
//! the next stage.

mod config;
mod dispatch;
mod error;
mod request;
mod response;
mod subject;

use std::sync::Arc;

use axum::body::Body;
use axum::extract::Request;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub use config::{ConfigError, PublishConfig, DEFAULT_TIMEOUT_MS, SERVICE_ERROR_CODE_HEADER};
pub use dispatch::{BusOutcome, Dispatcher, FailureKind};
pub use error::{BridgeError, ErrorKind};
pub use request::{collect_single_valued_headers, BridgeRequest, RequestTranslator};
pub use response::{BufferedResponse, ResponseSink, ResponseState, ResponseTranslator};
pub use subject::{SubjectResolver, Verbatim};

use crate::bus::BusClient;

/// What the caller should do after `Bridge::handle` succeeds.
#[derive(Debug)]
pub enum Handled {
    /// The message was published; run the next stage with this request.
    Continue(Request),
    /// A response was written to the sink.
    Responded(ResponseState),
}

/// One configured bridge: config, subject resolver and bus client.
///
/// ## Example
///
/// ```ignore
/// let bus = Arc::new(InMemoryBus::new());
/// let bridge = Bridge::new(PublishConfig::new("orders.create").request_reply(2000), bus);
///
/// let mut sink = BufferedResponse::new();
/// match bridge.handle(request, &mut sink, &CancellationToken::new()).await? {
///     Handled::Continue(request) => next.run(request).await,
///     Handled::Responded(_) => sink.into_response(),
/// }
/// ```
pub struct Bridge {
    config: PublishConfig,
    resolver: Arc<dyn SubjectResolver>,
    requests: RequestTranslator,
    dispatcher: Dispatcher,
    responses: ResponseTranslator,
}

impl Bridge {
    pub fn new(config: PublishConfig, client: Arc<dyn BusClient>) -> Self {
        Self {
            requests: RequestTranslator::new(&config),
            responses: ResponseTranslator::new(config.status_header.clone()),
            dispatcher: Dispatcher::new(client),
            resolver: Arc::new(Verbatim),
            config,
        }
    }

    /// Replace the default `Verbatim` subject resolver.
    pub fn with_resolver(mut self, resolver: impl SubjectResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    pub fn config(&self) -> &PublishConfig {
        &self.config
    }

    /// Bridge a single request.
    ///
    /// On error, whatever the error kind prescribes has already been written
    /// to `sink` (see `ErrorKind::status`). `cancel` aborts the in-flight bus
    /// call when the inbound request goes away.
    pub async fn handle<S: ResponseSink>(
        &self,
        request: Request,
        sink: &mut S,
        cancel: &CancellationToken,
    ) -> Result<Handled, BridgeError> {
        let (parts, body) = request.into_parts();
        let subject = self.resolver.resolve(&self.config.subject, &parts);

        let bridge_request = self.requests.translate(subject, &parts.headers, body).await?;
        let payload = bridge_request.payload.clone();
        let subject = bridge_request.subject.clone();

        let outcome = self.dispatcher.dispatch(bridge_request, cancel).await;
        match self.responses.translate(outcome, sink)? {
            ResponseState::Published => {
                debug!(%subject, "published; continuing to next stage");
                Ok(Handled::Continue(Request::from_parts(parts, Body::from(payload))))
            }
            state => {
                debug!(%subject, ?state, "bus reply translated");
                Ok(Handled::Responded(state))
            }
        }
    }
}
