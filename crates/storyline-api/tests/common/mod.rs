//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use storyline_catalog::domain::catalog::Catalog;
use storyline_core::clock::Clock;
use storyline_player::domain::config::PlaybackConfig;
use storyline_test_support::{FixedClock, fixture_catalog, fixture_time};
use tower::ServiceExt;

use storyline_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(fixture_time()))
}

/// One second per post at four ticks per second.
pub fn test_playback() -> PlaybackConfig {
    PlaybackConfig::new(Duration::from_millis(1_000), 4).unwrap()
}

/// Build app state over a fixture catalog with one collection per entry of
/// `post_counts`.
pub fn build_test_state(post_counts: &[usize]) -> AppState {
    build_test_state_with_catalog(fixture_catalog(post_counts))
}

/// Build app state over an arbitrary catalog.
pub fn build_test_state_with_catalog(catalog: Catalog) -> AppState {
    AppState::new(catalog, test_playback(), fixed_clock()).unwrap()
}

/// Build the full app router. Uses the same route structure as `main.rs`.
pub fn build_test_app(state: &AppState) -> Router {
    storyline_api::app(state.clone())
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a POST request without a body and return the response.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
