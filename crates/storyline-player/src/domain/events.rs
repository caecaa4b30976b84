//! Playback events recorded by the story player.

use serde::{Deserialize, Serialize};
use storyline_catalog::domain::profile::UserId;
use storyline_core::event::{DomainEvent, EventMetadata};

/// Why an activation ended on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    /// Advanced past the last post.
    Exhausted,
    /// Retreated past the first post.
    Rewound,
}

/// Emitted when the player starts a new activation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationStarted {
    /// Story line position of the collection.
    pub collection_index: usize,
    /// The collection's author.
    pub author: UserId,
    /// Number of posts in the collection.
    pub post_count: usize,
}

/// Emitted when the current post changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostChanged {
    /// Previous post index.
    pub from: usize,
    /// New post index.
    pub to: usize,
    /// `true` when the change came from the timer rather than user input.
    pub automatic: bool,
}

/// Emitted when playback is held or resumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackToggled {
    /// Post being shown.
    pub post_index: usize,
    /// Elapsed percentage at the moment of the toggle.
    pub elapsed_percent: f64,
}

/// Emitted when an activation completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationCompleted {
    /// Why it completed.
    pub reason: CompletionReason,
    /// Post index at completion.
    pub post_index: usize,
}

/// Event type identifier for [`ActivationStarted`].
pub const ACTIVATION_STARTED_EVENT_TYPE: &str = "player.activation_started";

/// Event type identifier for forward [`PostChanged`] events.
pub const POST_ADVANCED_EVENT_TYPE: &str = "player.post_advanced";

/// Event type identifier for backward [`PostChanged`] events.
pub const POST_RETREATED_EVENT_TYPE: &str = "player.post_retreated";

/// Event type identifier for a hold.
pub const PLAYBACK_HELD_EVENT_TYPE: &str = "player.playback_held";

/// Event type identifier for a resume.
pub const PLAYBACK_RESUMED_EVENT_TYPE: &str = "player.playback_resumed";

/// Event type identifier for [`ActivationCompleted`].
pub const ACTIVATION_COMPLETED_EVENT_TYPE: &str = "player.activation_completed";

/// Event type identifier for a close.
pub const ACTIVATION_CLOSED_EVENT_TYPE: &str = "player.activation_closed";

/// Event payload variants for the story player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlaybackEventKind {
    /// A new activation began at post 0.
    ActivationStarted(ActivationStarted),
    /// Moved to a later post.
    PostAdvanced(PostChanged),
    /// Moved to an earlier post.
    PostRetreated(PostChanged),
    /// The clock was stopped by the user.
    PlaybackHeld(PlaybackToggled),
    /// The clock was restarted by the user.
    PlaybackResumed(PlaybackToggled),
    /// The activation reached a boundary.
    ActivationCompleted(ActivationCompleted),
    /// The activation was closed.
    ActivationClosed,
}

impl PlaybackEventKind {
    /// Returns the event type name for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ActivationStarted(_) => ACTIVATION_STARTED_EVENT_TYPE,
            Self::PostAdvanced(_) => POST_ADVANCED_EVENT_TYPE,
            Self::PostRetreated(_) => POST_RETREATED_EVENT_TYPE,
            Self::PlaybackHeld(_) => PLAYBACK_HELD_EVENT_TYPE,
            Self::PlaybackResumed(_) => PLAYBACK_RESUMED_EVENT_TYPE,
            Self::ActivationCompleted(_) => ACTIVATION_COMPLETED_EVENT_TYPE,
            Self::ActivationClosed => ACTIVATION_CLOSED_EVENT_TYPE,
        }
    }
}

/// Playback event envelope.
#[derive(Debug, Clone)]
pub struct PlaybackEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: PlaybackEventKind,
}

impl DomainEvent for PlaybackEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).unwrap_or(serde_json::Value::Null)
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}

