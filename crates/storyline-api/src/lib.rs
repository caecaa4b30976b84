//! Storyline — HTTP API.
//!
//! Exposes the story line and its player over JSON. The router is built here
//! so integration tests drive the same route tree as the server binary.

use axum::Router;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

/// Builds the full application router.
pub fn app(state: state::AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/story-line", routes::story_line::router())
        .nest("/api/v1/player", routes::player::router())
        .with_state(state)
}
