//! Pointer inputs, as commands.

use uuid::Uuid;

/// Trait that all player commands implement.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging).
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the system.
    fn correlation_id(&self) -> Uuid;
}

/// Click on an avatar in the strip.
#[derive(Debug, Clone)]
pub struct OpenStory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Strip position that was clicked.
    pub index: usize,
}

/// Click on the close button.
#[derive(Debug, Clone)]
pub struct CloseStory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

/// Click on the forward half of the player.
#[derive(Debug, Clone)]
pub struct StepForward {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

/// Click on the backward half of the player.
#[derive(Debug, Clone)]
pub struct StepBackward {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

/// Press and hold on the player.
#[derive(Debug, Clone)]
pub struct HoldPlayback {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

/// Release after a hold.
#[derive(Debug, Clone)]
pub struct ResumePlayback {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for OpenStory {
    fn command_type(&self) -> &'static str {
        "player.open_story"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for CloseStory {
    fn command_type(&self) -> &'static str {
        "player.close_story"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for StepForward {
    fn command_type(&self) -> &'static str {
        "player.step_forward"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for StepBackward {
    fn command_type(&self) -> &'static str {
        "player.step_backward"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for HoldPlayback {
    fn command_type(&self) -> &'static str {
        "player.hold_playback"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for ResumePlayback {
    fn command_type(&self) -> &'static str {
        "player.resume_playback"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
