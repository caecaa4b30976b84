//! Routes for the player overlay.
//!
//! Every command returns the player view as it stands after the command.

use axum::extract::State;
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use storyline_player::application::command_handlers;
use storyline_player::application::query_handlers::{self, PlayerView};
use storyline_player::domain::commands;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /open.
#[derive(Debug, Deserialize)]
pub struct OpenStoryRequest {
    /// Story line position of the clicked avatar.
    pub index: usize,
}

/// GET /
#[instrument(skip(state))]
async fn get_player(State(state): State<AppState>) -> Result<Json<PlayerView>, ApiError> {
    let view = query_handlers::get_player_view(&state.session)?;
    Ok(Json(view))
}

/// POST /open
#[instrument(skip(state, request), fields(index = request.index))]
async fn open_story(
    State(state): State<AppState>,
    Json(request): Json<OpenStoryRequest>,
) -> Result<Json<PlayerView>, ApiError> {
    let command = commands::OpenStory {
        correlation_id: Uuid::new_v4(),
        index: request.index,
    };

    info!(correlation_id = %command.correlation_id, "handling open_story command");

    let view = command_handlers::handle_open_story(&command, &state.session)?;
    Ok(Json(view))
}

/// POST /close
#[instrument(skip(state))]
async fn close_story(State(state): State<AppState>) -> Result<Json<PlayerView>, ApiError> {
    let command = commands::CloseStory {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling close_story command");

    let view = command_handlers::handle_close_story(&command, &state.session)?;
    Ok(Json(view))
}

/// POST /forward
#[instrument(skip(state))]
async fn step_forward(State(state): State<AppState>) -> Result<Json<PlayerView>, ApiError> {
    let command = commands::StepForward {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling step_forward command");

    let view = command_handlers::handle_step_forward(&command, &state.session)?;
    Ok(Json(view))
}

/// POST /backward
#[instrument(skip(state))]
async fn step_backward(State(state): State<AppState>) -> Result<Json<PlayerView>, ApiError> {
    let command = commands::StepBackward {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling step_backward command");

    let view = command_handlers::handle_step_backward(&command, &state.session)?;
    Ok(Json(view))
}

/// POST /hold
#[instrument(skip(state))]
async fn hold_playback(State(state): State<AppState>) -> Result<Json<PlayerView>, ApiError> {
    let command = commands::HoldPlayback {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling hold_playback command");

    let view = command_handlers::handle_hold_playback(&command, &state.session)?;
    Ok(Json(view))
}

/// POST /resume
#[instrument(skip(state))]
async fn resume_playback(State(state): State<AppState>) -> Result<Json<PlayerView>, ApiError> {
    let command = commands::ResumePlayback {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling resume_playback command");

    let view = command_handlers::handle_resume_playback(&command, &state.session)?;
    Ok(Json(view))
}

/// Returns the router for the player.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_player))
        .route("/open", post(open_story))
        .route("/close", post(close_story))
        .route("/forward", post(step_forward))
        .route("/backward", post(step_backward))
        .route("/hold", post(hold_playback))
        .route("/resume", post(resume_playback))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use storyline_player::domain::config::PlaybackConfig;
    use storyline_test_support::{FixedClock, fixture_catalog, fixture_time};
    use tower::ServiceExt;

    fn test_app_state(post_counts: &[usize]) -> AppState {
        AppState::new(
            fixture_catalog(post_counts),
            PlaybackConfig::new(Duration::from_millis(1_000), 4).unwrap(),
            Arc::new(FixedClock(fixture_time())),
        )
        .unwrap()
    }

    async fn send(
        state: &AppState,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let app = router().with_state(state.clone());
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body_bytes).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_player_when_closed() {
        let state = test_app_state(&[2]);

        let (status, json) = send(&state, "GET", "/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["overlay"]["status"], "closed");
        assert_eq!(json["state"], "closed");
        assert!(json["current_post"].is_null());
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_story_returns_200_with_player_view() {
        // Arrange
        let state = test_app_state(&[2, 3]);

        // Act
        let (status, json) = send(
            &state,
            "POST",
            "/open",
            Some(serde_json::json!({ "index": 1 })),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["overlay"]["status"], "open");
        assert_eq!(json["overlay"]["index"], 1);
        assert_eq!(json["state"], "playing");
        assert_eq!(json["current_post"], 0);
        assert_eq!(json["post_count"], 3);
        assert_eq!(json["segments"].as_array().unwrap().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_story_out_of_range_returns_404() {
        let state = test_app_state(&[2]);

        let (status, json) = send(
            &state,
            "POST",
            "/open",
            Some(serde_json::json!({ "index": 5 })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "index_out_of_range");
    }

    #[tokio::test(start_paused = true)]
    async fn test_forward_then_hold_then_resume() {
        // Arrange
        let state = test_app_state(&[3]);
        send(&state, "POST", "/open", Some(serde_json::json!({ "index": 0 }))).await;

        // Act
        let (_, forward) = send(&state, "POST", "/forward", None).await;
        let (_, held) = send(&state, "POST", "/hold", None).await;
        let (_, resumed) = send(&state, "POST", "/resume", None).await;

        // Assert
        assert_eq!(forward["current_post"], 1);
        assert_eq!(held["state"], "held");
        assert_eq!(resumed["state"], "playing");
        assert_eq!(resumed["current_post"], 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backward_on_first_post_closes_overlay() {
        let state = test_app_state(&[3]);
        send(&state, "POST", "/open", Some(serde_json::json!({ "index": 0 }))).await;

        let (status, json) = send(&state, "POST", "/backward", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["overlay"]["status"], "closed");
        assert_eq!(json["state"], "closed");
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_story_stops_playback() {
        let state = test_app_state(&[3]);
        send(&state, "POST", "/open", Some(serde_json::json!({ "index": 0 }))).await;

        let (status, json) = send(&state, "POST", "/close", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["state"], "closed");
        assert!(!state.session.is_ticking().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_player_advances_on_its_own() {
        let state = test_app_state(&[3]);
        send(&state, "POST", "/open", Some(serde_json::json!({ "index": 0 }))).await;

        tokio::time::sleep(Duration::from_millis(1_100)).await;
        let (_, json) = send(&state, "GET", "/", None).await;

        assert_eq!(json["current_post"], 1);
        assert_eq!(json["elapsed_percent"], 0.0);
    }
}
