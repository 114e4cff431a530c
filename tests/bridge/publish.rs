//! Fire-and-forget publish through the HTTP layer.

use std::sync::atomic::Ordering;

use bytes::Bytes;
use bus_bridge::bus::{BusError, InMemoryBus};
use bus_bridge::PublishConfig;

use crate::support::start_server;

#[tokio::test]
async fn publish_then_continue_to_downstream() {
    let bus = InMemoryBus::new();
    let (base, hits) = start_server(PublishConfig::new("orders.created"), bus.clone()).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/orders"))
        .header("x-tag", "a")
        .body("hello")
        .send()
        .await
        .unwrap();

    // Downstream answered, and still saw the payload.
    assert_eq!(resp.status(), 202);
    assert_eq!(resp.text().await.unwrap(), "hello");
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    let published = bus.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].subject, "orders.created");
    assert_eq!(published[0].payload, Bytes::from_static(b"hello"));
    assert!(published[0].headers.is_empty());
}

#[tokio::test]
async fn publish_failure_stops_the_pipeline() {
    let bus = InMemoryBus::new();
    bus.fail_next(BusError::ConnectionFailed("broker down".into()));
    let (base, hits) = start_server(PublishConfig::new("orders.created"), bus.clone()).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/orders"))
        .body("hello")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);
    assert!(resp.bytes().await.unwrap().is_empty());
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert!(bus.published().is_empty());
}
