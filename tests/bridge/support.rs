//! Shared server setup for bridge integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use bus_bridge::bus::InMemoryBus;
use bus_bridge::{http, Bridge, PublishConfig};

/// Downstream stage: counts hits and echoes the body back with 202.
pub fn downstream(hits: Arc<AtomicUsize>) -> Router {
    Router::new().route(
        "/orders",
        post(move |body: String| {
            let hits = Arc::clone(&hits);
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                (StatusCode::ACCEPTED, body)
            }
        }),
    )
}

/// Bind to port 0 and return the base URL plus the downstream hit counter.
pub async fn start_server(config: PublishConfig, bus: InMemoryBus) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let bridge = Arc::new(Bridge::new(config, Arc::new(bus)));
    let app = http::router(bridge, downstream(Arc::clone(&hits)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), hits)
}
