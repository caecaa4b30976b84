//! Query handlers for the player.
//!
//! Views are snapshots taken under the session lock; they are never fed back
//! into the player.

use serde::Serialize;
use storyline_catalog::domain::profile::UserId;
use storyline_catalog::domain::story::MediaType;
use storyline_core::error::DomainError;
use uuid::Uuid;

use crate::application::session::PlaybackSession;
use crate::domain::player::PlayerState;
use crate::domain::progress::ProgressSegment;
use crate::domain::story_line::{Overlay, StoryLineNavigator};

/// Read-only view of the overlay and the player inside it.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    /// Overlay visibility.
    pub overlay: Overlay,
    /// Player state.
    pub state: PlayerState,
    /// Current activation, if any.
    pub activation_id: Option<Uuid>,
    /// Strip position being played.
    pub active_index: Option<usize>,
    /// Author of the collection being played.
    pub author: Option<UserId>,
    /// Post on screen.
    pub current_post: Option<usize>,
    /// Posts in the active collection.
    pub post_count: usize,
    /// Elapsed share of the current post.
    pub elapsed_percent: f64,
    /// Media type of the post on screen.
    pub media_type: Option<MediaType>,
    /// Media URL of the post on screen.
    pub content_url: Option<String>,
    /// Progress bar.
    pub segments: Vec<ProgressSegment>,
}

impl PlayerView {
    /// Snapshots `navigator`.
    #[must_use]
    pub fn from_navigator(navigator: &StoryLineNavigator) -> Self {
        let player = navigator.player();
        let post = navigator.active_index().and_then(|index| {
            let collection = navigator.story_line().collection(index)?;
            collection.posts.get(player.current_post()?)
        });
        Self {
            overlay: navigator.overlay(),
            state: player.state(),
            activation_id: player.activation_id(),
            active_index: navigator.active_index(),
            author: player.author().cloned(),
            current_post: player.current_post(),
            post_count: player.post_count(),
            elapsed_percent: player.elapsed_percent(),
            media_type: post.map(|p| p.media_type),
            content_url: post.map(|p| p.content_url.clone()),
            segments: player.progress(),
        }
    }
}

/// Retrieves the current player view.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the session lock is poisoned.
pub fn get_player_view(session: &PlaybackSession) -> Result<PlayerView, DomainError> {
    session.read(PlayerView::from_navigator)
}
