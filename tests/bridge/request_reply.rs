//! Request/reply through the HTTP layer.

use std::sync::atomic::Ordering;

use bus_bridge::bus::{BusMessage, InMemoryBus};
use bus_bridge::{PublishConfig, SERVICE_ERROR_CODE_HEADER};

use crate::support::start_server;

fn config(timeout_ms: i64) -> PublishConfig {
    PublishConfig::new("svc.orders").request_reply(timeout_ms)
}

async fn post(base: &str, body: &'static str) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{base}/orders"))
        .body(body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn reply_becomes_response_body() {
    let bus = InMemoryBus::new();
    bus.respond("svc.orders", |req| {
        assert_eq!(req.payload_str(), Some("hello"));
        Some(BusMessage::new("", "world"))
    });
    let (base, hits) = start_server(config(1000), bus).await;

    let resp = post(&base, "hello").await;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "world");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn service_error_code_overrides_status() {
    let bus = InMemoryBus::new();
    bus.respond("svc.orders", |_| {
        Some(BusMessage::new("", "fail").with_header(SERVICE_ERROR_CODE_HEADER, "503"))
    });
    let (base, _) = start_server(config(1000), bus).await;

    let resp = post(&base, "hello").await;
    assert_eq!(resp.status(), 503);
    assert_eq!(resp.text().await.unwrap(), "fail");
}

#[tokio::test]
async fn no_responders_is_404() {
    let (base, _) = start_server(config(1000), InMemoryBus::new()).await;

    let resp = post(&base, "hello").await;
    assert_eq!(resp.status(), 404);
    assert!(resp.bytes().await.unwrap().is_empty());
}

#[tokio::test]
async fn timeout_is_500() {
    let bus = InMemoryBus::new();
    bus.stall("svc.orders");
    let (base, _) = start_server(config(50), bus).await;

    let resp = post(&base, "hello").await;
    assert_eq!(resp.status(), 500);
    assert!(resp.bytes().await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_service_error_code_gets_caller_fallback() {
    let bus = InMemoryBus::new();
    bus.respond("svc.orders", |_| {
        Some(BusMessage::new("", "fail").with_header(SERVICE_ERROR_CODE_HEADER, "abc"))
    });
    let (base, _) = start_server(config(1000), bus).await;

    // The bridge writes nothing; the HTTP layer answers 500 with no body.
    let resp = post(&base, "hello").await;
    assert_eq!(resp.status(), 500);
    assert!(resp.bytes().await.unwrap().is_empty());
}

#[tokio::test]
async fn repeated_header_forwards_first_value() {
    let bus = InMemoryBus::new();
    bus.respond("svc.orders", |req| {
        Some(BusMessage::new("", req.header("x-tag").unwrap_or("missing").to_string()))
    });
    let (base, _) = start_server(config(1000), bus.clone()).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/orders"))
        .header("x-tag", "a")
        .header("x-tag", "b")
        .body("hello")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.text().await.unwrap(), "a");

    let sent = bus.requests();
    let tags: Vec<_> = sent[0]
        .headers
        .iter()
        .filter(|(name, _)| name == "x-tag")
        .collect();
    assert_eq!(tags.len(), 1);
}

#[tokio::test]
async fn informational_service_error_code_is_rejected() {
    let bus = InMemoryBus::new();
    bus.respond("svc.orders", |_| {
        Some(BusMessage::new("", "payload").with_header(SERVICE_ERROR_CODE_HEADER, "103"))
    });
    let (base, hits) = start_server(config(1000), bus).await;

    // 1xx cannot be a final status; the bridge reports it instead of
    // handing hyper a response it would replace.
    let resp = post(&base, "hello").await;
    assert_eq!(resp.status(), 500);
    assert!(resp.bytes().await.unwrap().is_empty());
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}
