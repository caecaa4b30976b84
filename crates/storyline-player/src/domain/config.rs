//! Playback timing.

use std::time::Duration;

use storyline_core::error::DomainError;

/// Default display time per post.
pub const DEFAULT_STORY_DURATION: Duration = Duration::from_millis(5_000);

/// Default polling rate of the playback ticker.
pub const DEFAULT_FPS: u32 = 120;

/// Highest rate whose tick interval is still at least one nanosecond.
pub const MAX_FPS: u32 = 1_000_000_000;

/// How long each post is shown and how often the ticker fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    story_duration: Duration,
    fps: u32,
}

impl PlaybackConfig {
    /// Creates a config.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `fps` is zero or above
    /// [`MAX_FPS`], or `story_duration` is shorter than one millisecond.
    pub fn new(story_duration: Duration, fps: u32) -> Result<Self, DomainError> {
        if fps == 0 {
            return Err(DomainError::Validation("fps must be positive".to_owned()));
        }
        if fps > MAX_FPS {
            return Err(DomainError::Validation(format!(
                "fps must be at most {MAX_FPS}, got {fps}"
            )));
        }
        if story_duration.as_millis() == 0 {
            return Err(DomainError::Validation(
                "story duration must be at least 1ms".to_owned(),
            ));
        }
        Ok(Self {
            story_duration,
            fps,
        })
    }

    /// Display time per post.
    #[must_use]
    pub fn story_duration(&self) -> Duration {
        self.story_duration
    }

    /// Ticks per second.
    #[must_use]
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Period between ticks (`1/fps`).
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }

    /// Ticks needed to fill one post, rounded up, at least one.
    ///
    /// When `duration_ms * fps` is not a multiple of 1000 a post is shown
    /// for `ticks_per_post * tick_interval`, slightly longer than
    /// `story_duration`: 1001 ms at 4 fps takes 5 ticks, so 1250 ms.
    #[must_use]
    pub fn ticks_per_post(&self) -> u32 {
        let millis = self.story_duration.as_millis();
        let ticks = (millis * u128::from(self.fps)).div_ceil(1_000);
        u32::try_from(ticks).unwrap_or(u32::MAX).max(1)
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            story_duration: DEFAULT_STORY_DURATION,
            fps: DEFAULT_FPS,
        }
    }
}
