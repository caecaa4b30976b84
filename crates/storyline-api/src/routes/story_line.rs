//! Routes for the avatar strip and collection detail.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use tracing::instrument;

use storyline_catalog::application::query_handlers::{self, CollectionView, StoryLineView};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /
#[instrument(skip(state))]
async fn get_story_line(State(state): State<AppState>) -> Json<StoryLineView> {
    Json(query_handlers::story_line_view(&state.catalog))
}

/// GET /{index}
#[instrument(skip(state))]
async fn get_collection(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<CollectionView>, ApiError> {
    let view = query_handlers::collection_view(&state.catalog, index)?;
    Ok(Json(view))
}

/// Returns the router for the story line.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_story_line))
        .route("/{index}", get(get_collection))
}
