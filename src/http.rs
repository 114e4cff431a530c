//! HTTP transport - runs a `Bridge` in front of an axum router.
//!
//! The bridge is installed as middleware. Request/reply bridges answer
//! every request themselves; fire-and-forget bridges publish and then let
//! the downstream router produce the response.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use axum::{routing::post, Router};
//! use bus_bridge::{bus::InMemoryBus, http, Bridge, PublishConfig};
//!
//! let bridge = Arc::new(Bridge::new(
//!     PublishConfig::new("orders.created"),
//!     Arc::new(InMemoryBus::new()),
//! ));
//! let downstream = Router::new().route("/orders", post(|| async { "accepted" }));
//!
//! http::serve(http::router(bridge, downstream), "0.0.0.0:3000").await?;
//! ```

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::bridge::{Bridge, BufferedResponse, Handled};

/// Wrap `downstream` so every request passes through `bridge` first.
pub fn router(bridge: Arc<Bridge>, downstream: Router) -> Router {
    downstream.layer(axum::middleware::from_fn_with_state(bridge, middleware))
}

/// Serve `app` over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve(app: Router, addr: &str) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

/// Bridge middleware, usable directly with `axum::middleware::from_fn_with_state`.
///
/// The bus call is cancelled if this future is dropped (client disconnect).
/// When the bridge fails without having written a status, the request is
/// answered with the error kind's fallback status and an empty body.
pub async fn middleware(
    State(bridge): State<Arc<Bridge>>,
    request: Request,
    next: Next,
) -> Response {
    let cancel = CancellationToken::new();
    let _cancel_on_drop = cancel.clone().drop_guard();

    let mut sink = BufferedResponse::new();
    match bridge.handle(request, &mut sink, &cancel).await {
        Ok(Handled::Continue(request)) => next.run(request).await,
        Ok(Handled::Responded(_)) => sink.into_response(),
        Err(err) => {
            warn!(
                subject = %bridge.config().subject,
                kind = ?err.kind(),
                error = %err,
                "bus bridge request failed"
            );
            if sink.is_committed() {
                sink.into_response()
            } else {
                err.kind().fallback_status().into_response()
            }
        }
    }
}
