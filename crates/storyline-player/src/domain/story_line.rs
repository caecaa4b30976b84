//! The story line: the avatar strip and its overlay.

use std::sync::Arc;

use serde::Serialize;
use storyline_catalog::domain::story::StoryLine;
use storyline_core::clock::Clock;
use storyline_core::error::DomainError;
use uuid::Uuid;

use super::player::{StoryPlayer, Transition};

/// Visibility of the player overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Overlay {
    /// Only the strip is visible.
    Closed,
    /// The player covers the screen, playing the collection at `index`.
    Open {
        /// Story line position being played.
        index: usize,
    },
}

/// Owns the player and opens/closes it for strip positions.
#[derive(Debug)]
pub struct StoryLineNavigator {
    story_line: Arc<StoryLine>,
    overlay: Overlay,
    player: StoryPlayer,
}

impl StoryLineNavigator {
    /// Creates a navigator with the overlay closed.
    #[must_use]
    pub fn new(story_line: Arc<StoryLine>, player: StoryPlayer) -> Self {
        Self {
            story_line,
            overlay: Overlay::Closed,
            player,
        }
    }

    /// The strip being navigated.
    #[must_use]
    pub fn story_line(&self) -> &StoryLine {
        &self.story_line
    }

    /// Overlay visibility.
    #[must_use]
    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    /// Position being played, if open.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        match self.overlay {
            Overlay::Open { index } => Some(index),
            Overlay::Closed => None,
        }
    }

    /// The owned player.
    #[must_use]
    pub fn player(&self) -> &StoryPlayer {
        &self.player
    }

    /// Mutable access to the owned player, for draining events.
    pub fn player_mut(&mut self) -> &mut StoryPlayer {
        &mut self.player
    }

    /// Opens the overlay on the collection at `index` and starts playback.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IndexOutOfRange` if `index` is not a strip
    /// position. The overlay and player are left untouched in that case.
    pub fn open(
        &mut self,
        index: usize,
        activation_id: Uuid,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        let collection = self
            .story_line
            .collection(index)
            .ok_or(DomainError::IndexOutOfRange {
                index,
                len: self.story_line.len(),
            })?;
        self.player
            .open(activation_id, index, collection, correlation_id, clock)?;
        self.overlay = Overlay::Open { index };
        Ok(())
    }

    /// Closes the overlay. Valid from any state.
    pub fn close(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Transition {
        self.overlay = Overlay::Closed;
        self.player.close(correlation_id, clock)
    }

    /// Feeds a timer tick to the player.
    pub fn tick(&mut self, epoch: u64, clock: &dyn Clock) -> Transition {
        let transition = self.player.tick(epoch, clock);
        self.settle(transition, clock)
    }

    /// Manual forward.
    pub fn forward(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Transition {
        let transition = self.player.advance(correlation_id, clock);
        self.settle_with(transition, correlation_id, clock)
    }

    /// Manual backward.
    pub fn backward(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Transition {
        let transition = self.player.retreat(correlation_id, clock);
        self.settle_with(transition, correlation_id, clock)
    }

    /// Holds playback.
    pub fn hold(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Transition {
        self.player.hold(correlation_id, clock)
    }

    /// Resumes playback.
    pub fn resume(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Transition {
        self.player.resume(correlation_id, clock)
    }

    fn settle(&mut self, transition: Transition, clock: &dyn Clock) -> Transition {
        let correlation_id = self.player.activation_id().unwrap_or_else(Uuid::nil);
        self.settle_with(transition, correlation_id, clock)
    }

    // A completed activation returns the strip to its closed state.
    fn settle_with(
        &mut self,
        transition: Transition,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Transition {
        if let Transition::Completed(_) = transition {
            self.close(correlation_id, clock);
        }
        transition
    }
}
