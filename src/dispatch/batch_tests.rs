//! Tests for batch dispatch behavior

use super::{DispatchOptions, Dispatcher};
use crate::error::DispatchError;
use crate::outcome::Outcome;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A 127.0.0.1 URL whose port was just bound and released, so connections
/// are refused.
fn refused_url() -> String {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    format!("http://127.0.0.1:{}/", port)
}

async fn server_with_route(route: &str, body: &str, delay: Duration) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .set_delay(delay),
        )
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_dispatch_returns_one_outcome_per_input() {
    let server = server_with_route("/ok", "body", Duration::ZERO).await;
    let urls = vec![format!("{}/ok", server.uri()); 5];

    let dispatcher = Dispatcher::new();
    let outcomes = dispatcher.dispatch(&urls).await;
    assert_eq!(outcomes.len(), 5);
    assert!(outcomes.iter().all(|o| o.is_success()));

    let outcomes = dispatcher.dispatch_detached(&urls).await;
    assert_eq!(outcomes.len(), 5);
    assert!(outcomes.iter().all(|o| o.is_success()));
}

#[tokio::test]
async fn test_dispatch_preserves_input_order_under_skewed_latency() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("slow")
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fast"))
        .mount(&server)
        .await;

    // The first input is the slowest, so arrival order differs from input
    // order and any arrival-order collection would misplace it.
    let urls = vec![
        format!("{}/slow", server.uri()),
        format!("{}/fast", server.uri()),
        format!("{}/fast", server.uri()),
    ];

    let dispatcher = Dispatcher::new();
    for outcomes in [
        dispatcher.dispatch(&urls).await,
        dispatcher.dispatch_detached(&urls).await,
    ] {
        assert_eq!(outcomes[0], Outcome::Success("slow".to_string()));
        assert_eq!(outcomes[1], Outcome::Success("fast".to_string()));
        assert_eq!(outcomes[2], Outcome::Success("fast".to_string()));
    }
}

#[tokio::test]
async fn test_empty_batch_returns_immediately() {
    let dispatcher = Dispatcher::new();
    let urls: Vec<String> = Vec::new();

    let outcomes = tokio::time::timeout(Duration::from_secs(1), dispatcher.dispatch(&urls))
        .await
        .expect("empty joined dispatch should not block");
    assert!(outcomes.is_empty());

    let outcomes = tokio::time::timeout(
        Duration::from_secs(1),
        dispatcher.dispatch_detached(&urls),
    )
    .await
    .expect("empty detached dispatch should not block");
    assert!(outcomes.is_empty());
}

#[tokio::test]
async fn test_transport_failure_yields_single_failure_without_hanging() {
    let server = server_with_route("/ok", "fine", Duration::ZERO).await;
    let urls = vec![refused_url(), format!("{}/ok", server.uri())];

    let dispatcher = Dispatcher::new();
    // A failing task must report exactly once; a zero-send or double-send
    // would either hang this collection loop or corrupt a slot.
    let outcomes = tokio::time::timeout(
        Duration::from_secs(10),
        dispatcher.dispatch_detached(&urls),
    )
    .await
    .expect("collection must not hang on a transport failure");

    assert_eq!(outcomes.len(), 2);
    match &outcomes[0] {
        Outcome::Failure(DispatchError::Transport { url, .. }) => assert_eq!(*url, urls[0]),
        other => panic!("expected transport failure, got {:?}", other),
    }
    assert_eq!(outcomes[1], Outcome::Success("fine".to_string()));
}

#[tokio::test]
async fn test_max_parallel_bounds_concurrency() {
    let server = server_with_route("/slow", "x", Duration::from_millis(100)).await;
    let urls = vec![format!("{}/slow", server.uri()); 6];

    let dispatcher = Dispatcher::with_options(DispatchOptions {
        max_parallel: Some(2),
        cancel: None,
    });

    // Six 100ms requests through two permits need at least three rounds.
    let start = Instant::now();
    let outcomes = dispatcher.dispatch(&urls).await;
    assert_eq!(outcomes.len(), 6);
    assert!(outcomes.iter().all(|o| o.is_success()));
    assert!(start.elapsed() >= Duration::from_millis(300));
}

#[tokio::test]
async fn test_zero_max_parallel_is_clamped() {
    let server = server_with_route("/ok", "ok", Duration::ZERO).await;
    let urls = vec![format!("{}/ok", server.uri()); 2];

    let dispatcher = Dispatcher::with_options(DispatchOptions {
        max_parallel: Some(0),
        cancel: None,
    });

    let outcomes = tokio::time::timeout(Duration::from_secs(5), dispatcher.dispatch(&urls))
        .await
        .expect("a zero limit must not deadlock the batch");
    assert_eq!(outcomes.len(), 2);
}
