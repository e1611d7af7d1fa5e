use axum::http::StatusCode;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::*;

#[tokio::test]
async fn test_blink_runs_four_phases_across_all_items() {
    let hub = MockServer::start().await;

    // OFF, ON, OFF, ON: every item sees two of each command
    for item in ["Kitchen", "Livingroom"] {
        mount_item_command(&hub, item, "OFF", 2).await;
        mount_item_command(&hub, item, "ON", 2).await;
    }

    let state = test_state(test_config(&hub));
    let start = Instant::now();
    let (status, body) = get(state, "/blink").await;
    let elapsed = start.elapsed();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "And it Blinked!");

    // Four phases, each followed by the configured delay
    assert!(
        elapsed >= 4 * BLINK_DELAY,
        "blink returned after {elapsed:?}, expected at least {:?}",
        4 * BLINK_DELAY
    );

    // Writes within a phase are fire-and-forget; give stragglers a moment
    // before the mock expectations are verified on drop
    tokio::time::sleep(Duration::from_millis(100)).await;
}

#[tokio::test]
async fn test_blink_ignores_prior_state() {
    let hub = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&hub)
        .await;

    let state = test_state(test_config(&hub));
    let (status, _) = get(state, "/blink").await;
    assert_eq!(status, StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(100)).await;

    // Blink is unconditional: no reads may reach the hub
    let requests = hub.received_requests().await.unwrap();
    assert!(!requests.is_empty());
    assert!(
        requests
            .iter()
            .all(|r| r.method == wiremock::http::Method::POST),
        "blink must not read item state"
    );
}

#[tokio::test]
async fn test_blink_completes_despite_hub_failures() {
    let hub = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&hub)
        .await;

    let state = test_state(test_config(&hub));
    let (status, body) = get(state, "/blink").await;

    // Failed writes are logged and dropped; the sequence still completes
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "And it Blinked!");
}

#[tokio::test]
async fn test_blink_targets_configured_items() {
    let hub = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/items/Porch"))
        .respond_with(ResponseTemplate::new(200))
        .expect(4)
        .mount(&hub)
        .await;

    let mut config = test_config(&hub);
    config.blink_items = vec!["Porch".to_string()];

    let state = test_state(config);
    let (status, _) = get(state, "/blink").await;
    assert_eq!(status, StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(100)).await;
}
