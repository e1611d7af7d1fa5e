//! Shared fixtures for integration tests: a wiremock hub standing in for
//! openHAB, plus helpers to drive the gateway router directly.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use openhab_gateway::{config::AppConfig, handlers, state::AppState};
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Short inter-phase delay so blink tests stay fast.
pub const BLINK_DELAY: Duration = Duration::from_millis(50);

pub const TEST_USER: &str = "user";
pub const TEST_PASSWORD: &str = "secret";

pub fn test_config(hub: &MockServer) -> AppConfig {
    test_config_for_host(&hub.uri())
}

pub fn test_config_for_host(host: &str) -> AppConfig {
    AppConfig {
        hub_host: host.to_string(),
        username: TEST_USER.to_string(),
        password: TEST_PASSWORD.to_string(),
        blink_items: vec!["Kitchen".to_string(), "Livingroom".to_string()],
        blink_phase_delay: BLINK_DELAY,
        request_timeout: Duration::from_secs(2),
        ..Default::default()
    }
}

pub fn test_state(config: AppConfig) -> AppState {
    AppState::new(config).unwrap()
}

/// Mount a hub item whose GET returns the given state string.
pub async fn mount_item_state(hub: &MockServer, item: &str, state: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/items/{item}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": item,
            "type": "Switch",
            "state": state,
        })))
        .mount(hub)
        .await;
}

/// Mount a hub write endpoint that expects `expected` commands with the
/// given plain-text body.
pub async fn mount_item_command(hub: &MockServer, item: &str, command: &str, expected: u64) {
    Mock::given(method("POST"))
        .and(path(format!("/items/{item}")))
        .and(body_string(command.to_string()))
        .respond_with(ResponseTemplate::new(200))
        .expect(expected)
        .mount(hub)
        .await;
}

/// Run a single GET against the gateway router and collect the response.
pub async fn get(state: AppState, uri: &str) -> (StatusCode, String) {
    let app = handlers::routes().with_state(state);

    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, String::from_utf8(body.to_vec()).unwrap())
}
