//! The story player state machine.
//!
//! One activation plays one user's collection from post 0. The player is
//! driven by three kinds of input: timer ticks, manual forward/backward, and
//! hold/resume. Every transition that changes who owns the clock bumps
//! `clock_epoch`; ticks carry the epoch they were armed for and are dropped
//! when it no longer matches.

use serde::Serialize;
use storyline_catalog::domain::profile::UserId;
use storyline_catalog::domain::story::UserStoryCollection;
use storyline_core::clock::Clock;
use storyline_core::error::DomainError;
use storyline_core::event::EventMetadata;
use uuid::Uuid;

use super::config::PlaybackConfig;
use super::events::{
    ActivationCompleted, ActivationStarted, CompletionReason, PlaybackEvent, PlaybackEventKind,
    PlaybackToggled, PostChanged,
};
use super::progress::{ProgressSegment, segments};

/// Player lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerState {
    /// No activation.
    Closed,
    /// The clock is running on the current post.
    Playing,
    /// The user is holding playback; the clock is stopped.
    Held,
    /// The activation completed and awaits an external close. Inert.
    PausedAtBoundary,
}

/// Result of feeding one input to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The input did not apply in the current state (or was stale).
    Ignored,
    /// The current post's elapsed time grew.
    Progressed,
    /// The current post changed.
    Moved {
        /// Previous post index.
        from: usize,
        /// New post index.
        to: usize,
    },
    /// Hold or resume took effect.
    Toggled,
    /// The activation hit a boundary.
    Completed(CompletionReason),
    /// The activation was closed.
    Closed,
}

#[derive(Debug, Clone)]
struct Activation {
    id: Uuid,
    collection_index: usize,
    author: UserId,
    post_count: usize,
    current_post: usize,
    elapsed_ticks: u32,
    next_sequence: i64,
}

/// Sequences a single user's story posts.
#[derive(Debug)]
pub struct StoryPlayer {
    config: PlaybackConfig,
    state: PlayerState,
    activation: Option<Activation>,
    clock_epoch: u64,
    uncommitted_events: Vec<PlaybackEvent>,
}

impl StoryPlayer {
    /// Creates a closed player.
    #[must_use]
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            config,
            state: PlayerState::Closed,
            activation: None,
            clock_epoch: 0,
            uncommitted_events: Vec::new(),
        }
    }

    /// Timing configuration.
    #[must_use]
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Epoch a ticker must present for its ticks to count.
    #[must_use]
    pub fn clock_epoch(&self) -> u64 {
        self.clock_epoch
    }

    /// Whether a ticker should be running right now.
    #[must_use]
    pub fn is_clock_live(&self) -> bool {
        self.state == PlayerState::Playing
    }

    /// Identifier of the current activation.
    #[must_use]
    pub fn activation_id(&self) -> Option<Uuid> {
        self.activation.as_ref().map(|a| a.id)
    }

    /// Story line position being played.
    #[must_use]
    pub fn collection_index(&self) -> Option<usize> {
        self.activation.as_ref().map(|a| a.collection_index)
    }

    /// Author of the collection being played.
    #[must_use]
    pub fn author(&self) -> Option<&UserId> {
        self.activation.as_ref().map(|a| &a.author)
    }

    /// Index of the post on screen.
    #[must_use]
    pub fn current_post(&self) -> Option<usize> {
        self.activation.as_ref().map(|a| a.current_post)
    }

    /// Number of posts in the active collection, zero when closed.
    #[must_use]
    pub fn post_count(&self) -> usize {
        self.activation.as_ref().map_or(0, |a| a.post_count)
    }

    /// Elapsed share of the current post, `0..=100`.
    #[must_use]
    pub fn elapsed_percent(&self) -> f64 {
        self.activation.as_ref().map_or(0.0, |a| {
            let ratio = f64::from(a.elapsed_ticks) / f64::from(self.config.ticks_per_post());
            (ratio * 100.0).min(100.0)
        })
    }

    /// Progress bar segments for the active collection.
    #[must_use]
    pub fn progress(&self) -> Vec<ProgressSegment> {
        match &self.activation {
            Some(a) => segments(a.post_count, a.current_post, self.elapsed_percent()),
            None => Vec::new(),
        }
    }

    /// Events recorded since the last [`StoryPlayer::take_events`].
    #[must_use]
    pub fn uncommitted_events(&self) -> &[PlaybackEvent] {
        &self.uncommitted_events
    }

    /// Drains recorded events.
    pub fn take_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.uncommitted_events)
    }

    /// Starts a new activation at post 0, closing any current one first.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvariantViolation` if `collection` has no posts.
    pub fn open(
        &mut self,
        activation_id: Uuid,
        collection_index: usize,
        collection: &UserStoryCollection,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if collection.is_empty() {
            return Err(DomainError::InvariantViolation(format!(
                "collection {collection_index} for {} has no posts",
                collection.author
            )));
        }

        self.close(correlation_id, clock);

        self.activation = Some(Activation {
            id: activation_id,
            collection_index,
            author: collection.author.clone(),
            post_count: collection.len(),
            current_post: 0,
            elapsed_ticks: 0,
            next_sequence: 1,
        });
        self.state = PlayerState::Playing;
        self.bump_epoch();
        self.record(
            PlaybackEventKind::ActivationStarted(ActivationStarted {
                collection_index,
                author: collection.author.clone(),
                post_count: collection.len(),
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Applies one timer tick armed for `epoch`.
    pub fn tick(&mut self, epoch: u64, clock: &dyn Clock) -> Transition {
        if epoch != self.clock_epoch || self.state != PlayerState::Playing {
            return Transition::Ignored;
        }
        let ticks_per_post = self.config.ticks_per_post();
        let Some(activation) = self.activation.as_mut() else {
            return Transition::Ignored;
        };
        activation.elapsed_ticks = activation.elapsed_ticks.saturating_add(1);
        if activation.elapsed_ticks < ticks_per_post {
            return Transition::Progressed;
        }
        let correlation_id = activation.id;
        self.step_forward(correlation_id, true, clock)
    }

    /// Manual forward: next post, or complete on the last one.
    pub fn advance(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Transition {
        if !self.accepts_navigation() {
            return Transition::Ignored;
        }
        self.step_forward(correlation_id, false, clock)
    }

    /// Manual backward: previous post, or complete on the first one.
    pub fn retreat(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Transition {
        if !self.accepts_navigation() {
            return Transition::Ignored;
        }
        let Some(activation) = self.activation.as_mut() else {
            return Transition::Ignored;
        };
        let from = activation.current_post;
        if from == 0 {
            return self.complete(CompletionReason::Rewound, correlation_id, clock);
        }
        activation.current_post = from - 1;
        activation.elapsed_ticks = 0;
        self.bump_epoch();
        self.record(
            PlaybackEventKind::PostRetreated(PostChanged {
                from,
                to: from - 1,
                automatic: false,
            }),
            correlation_id,
            clock,
        );
        Transition::Moved { from, to: from - 1 }
    }

    /// Stops the clock, keeping the elapsed time.
    pub fn hold(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Transition {
        if self.state != PlayerState::Playing {
            return Transition::Ignored;
        }
        self.state = PlayerState::Held;
        self.bump_epoch();
        let toggled = self.toggled();
        self.record(PlaybackEventKind::PlaybackHeld(toggled), correlation_id, clock);
        Transition::Toggled
    }

    /// Restarts the clock from where it was held.
    pub fn resume(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Transition {
        if self.state != PlayerState::Held {
            return Transition::Ignored;
        }
        self.state = PlayerState::Playing;
        self.bump_epoch();
        let toggled = self.toggled();
        self.record(PlaybackEventKind::PlaybackResumed(toggled), correlation_id, clock);
        Transition::Toggled
    }

    /// Ends the activation. Idempotent.
    pub fn close(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Transition {
        if self.state == PlayerState::Closed {
            return Transition::Ignored;
        }
        self.record(PlaybackEventKind::ActivationClosed, correlation_id, clock);
        self.state = PlayerState::Closed;
        self.activation = None;
        self.bump_epoch();
        Transition::Closed
    }

    fn accepts_navigation(&self) -> bool {
        matches!(self.state, PlayerState::Playing | PlayerState::Held)
    }

    fn step_forward(
        &mut self,
        correlation_id: Uuid,
        automatic: bool,
        clock: &dyn Clock,
    ) -> Transition {
        let Some(activation) = self.activation.as_mut() else {
            return Transition::Ignored;
        };
        let from = activation.current_post;
        if from + 1 >= activation.post_count {
            return self.complete(CompletionReason::Exhausted, correlation_id, clock);
        }
        activation.current_post = from + 1;
        activation.elapsed_ticks = 0;
        self.bump_epoch();
        self.record(
            PlaybackEventKind::PostAdvanced(PostChanged {
                from,
                to: from + 1,
                automatic,
            }),
            correlation_id,
            clock,
        );
        Transition::Moved { from, to: from + 1 }
    }

    fn complete(
        &mut self,
        reason: CompletionReason,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Transition {
        let post_index = self.current_post().unwrap_or(0);
        self.state = PlayerState::PausedAtBoundary;
        self.bump_epoch();
        self.record(
            PlaybackEventKind::ActivationCompleted(ActivationCompleted { reason, post_index }),
            correlation_id,
            clock,
        );
        Transition::Completed(reason)
    }

    fn toggled(&self) -> PlaybackToggled {
        PlaybackToggled {
            post_index: self.current_post().unwrap_or(0),
            elapsed_percent: self.elapsed_percent(),
        }
    }

    fn bump_epoch(&mut self) {
        self.clock_epoch = self.clock_epoch.wrapping_add(1);
    }

    fn record(&mut self, kind: PlaybackEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let Some(activation) = self.activation.as_mut() else {
            return;
        };
        let sequence_number = activation.next_sequence;
        activation.next_sequence += 1;
        self.uncommitted_events.push(PlaybackEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                activation_id: activation.id,
                sequence_number,
                correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        });
    }
}
