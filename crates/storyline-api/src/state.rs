//! Shared application state.

use std::sync::Arc;

use storyline_catalog::domain::catalog::Catalog;
use storyline_core::clock::Clock;
use storyline_core::error::DomainError;
use storyline_player::application::session::PlaybackSession;
use storyline_player::domain::config::PlaybackConfig;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The catalog loaded at startup. Read-only.
    pub catalog: Arc<Catalog>,
    /// The story line and its player.
    pub session: PlaybackSession,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("collections", &self.catalog.story_line().len())
            .field("session", &self.session)
            .finish()
    }
}

impl AppState {
    /// Create new application state with the overlay closed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` when called outside a tokio
    /// runtime.
    pub fn new(
        catalog: Catalog,
        playback: PlaybackConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, DomainError> {
        let story_line = catalog.shared_story_line();
        let session = PlaybackSession::new(story_line, playback, clock)?;
        Ok(Self {
            catalog: Arc::new(catalog),
            session,
        })
    }
}
