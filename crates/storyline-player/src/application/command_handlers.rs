//! Command handlers for the player.
//!
//! Each handler applies one pointer input to the session and returns the
//! resulting player view. Inputs that do not apply in the current state are
//! accepted and leave the view unchanged.

use storyline_core::clock::Clock;
use storyline_core::error::DomainError;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::application::query_handlers::PlayerView;
use crate::application::session::PlaybackSession;
use crate::domain::commands::{
    CloseStory, Command, HoldPlayback, OpenStory, ResumePlayback, StepBackward, StepForward,
};
use crate::domain::player::Transition;
use crate::domain::story_line::StoryLineNavigator;

/// Applies an infallible navigator input and snapshots the result.
fn apply_input(
    session: &PlaybackSession,
    command: &dyn Command,
    input: impl FnOnce(&mut StoryLineNavigator, Uuid, &dyn Clock) -> Transition,
) -> Result<PlayerView, DomainError> {
    let correlation_id = command.correlation_id();
    let (transition, view) = session.apply(|nav, clock| {
        let transition = input(nav, correlation_id, clock);
        Ok((transition, PlayerView::from_navigator(nav)))
    })?;
    info!(
        command_type = command.command_type(),
        %correlation_id,
        ?transition,
        "command handled"
    );
    Ok(view)
}

/// Handles `OpenStory`: starts a new activation on the chosen strip position,
/// replacing any activation in progress.
///
/// # Errors
///
/// Returns `DomainError::IndexOutOfRange` if the index is not a strip
/// position, or `DomainError::InvariantViolation` if its collection is empty.
#[instrument(skip(session), fields(correlation_id = %command.correlation_id))]
pub fn handle_open_story(
    command: &OpenStory,
    session: &PlaybackSession,
) -> Result<PlayerView, DomainError> {
    let activation_id = Uuid::new_v4();
    let view = session.apply(|nav, clock| {
        nav.open(command.index, activation_id, command.correlation_id, clock)?;
        Ok(PlayerView::from_navigator(nav))
    })?;
    info!(
        command_type = command.command_type(),
        index = command.index,
        %activation_id,
        "story opened"
    );
    Ok(view)
}

/// Handles `CloseStory`.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the session lock is poisoned.
#[instrument(skip(session), fields(correlation_id = %command.correlation_id))]
pub fn handle_close_story(
    command: &CloseStory,
    session: &PlaybackSession,
) -> Result<PlayerView, DomainError> {
    apply_input(session, command, |nav, id, clock| nav.close(id, clock))
}

/// Handles `StepForward`.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the session lock is poisoned.
#[instrument(skip(session), fields(correlation_id = %command.correlation_id))]
pub fn handle_step_forward(
    command: &StepForward,
    session: &PlaybackSession,
) -> Result<PlayerView, DomainError> {
    apply_input(session, command, |nav, id, clock| nav.forward(id, clock))
}

/// Handles `StepBackward`.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the session lock is poisoned.
#[instrument(skip(session), fields(correlation_id = %command.correlation_id))]
pub fn handle_step_backward(
    command: &StepBackward,
    session: &PlaybackSession,
) -> Result<PlayerView, DomainError> {
    apply_input(session, command, |nav, id, clock| nav.backward(id, clock))
}

/// Handles `HoldPlayback`.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the session lock is poisoned.
#[instrument(skip(session), fields(correlation_id = %command.correlation_id))]
pub fn handle_hold_playback(
    command: &HoldPlayback,
    session: &PlaybackSession,
) -> Result<PlayerView, DomainError> {
    apply_input(session, command, |nav, id, clock| nav.hold(id, clock))
}

/// Handles `ResumePlayback`.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the session lock is poisoned.
#[instrument(skip(session), fields(correlation_id = %command.correlation_id))]
pub fn handle_resume_playback(
    command: &ResumePlayback,
    session: &PlaybackSession,
) -> Result<PlayerView, DomainError> {
    apply_input(session, command, |nav, id, clock| nav.resume(id, clock))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use storyline_test_support::{FixedClock, fixture_catalog, fixture_time};

    use super::*;
    use crate::domain::config::PlaybackConfig;
    use crate::domain::player::PlayerState;
    use crate::domain::story_line::Overlay;

    fn session(post_counts: &[usize]) -> PlaybackSession {
        let catalog = fixture_catalog(post_counts);
        PlaybackSession::new(
            catalog.shared_story_line(),
            PlaybackConfig::new(Duration::from_millis(1_000), 4).unwrap(),
            Arc::new(FixedClock(fixture_time())),
        )
        .unwrap()
    }

    fn open(session: &PlaybackSession, index: usize) -> Result<PlayerView, DomainError> {
        handle_open_story(
            &OpenStory {
                correlation_id: Uuid::new_v4(),
                index,
            },
            session,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_open_story_starts_playback() {
        let session = session(&[2, 3]);

        let view = open(&session, 1).unwrap();

        assert_eq!(view.overlay, Overlay::Open { index: 1 });
        assert_eq!(view.state, PlayerState::Playing);
        assert_eq!(view.current_post, Some(0));
        assert_eq!(view.post_count, 3);
        assert!(session.is_ticking().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_open_story_out_of_range() {
        let session = session(&[2]);

        let result = open(&session, 2);

        assert!(matches!(
            result,
            Err(DomainError::IndexOutOfRange { index: 2, len: 1 })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_step_forward_then_backward() {
        // Arrange
        let session = session(&[3]);
        open(&session, 0).unwrap();

        // Act
        let forward = handle_step_forward(
            &StepForward {
                correlation_id: Uuid::new_v4(),
            },
            &session,
        )
        .unwrap();
        let backward = handle_step_backward(
            &StepBackward {
                correlation_id: Uuid::new_v4(),
            },
            &session,
        )
        .unwrap();

        // Assert
        assert_eq!(forward.current_post, Some(1));
        assert_eq!(backward.current_post, Some(0));
        assert_eq!(backward.state, PlayerState::Playing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_step_forward_on_last_post_closes() {
        let session = session(&[1]);
        open(&session, 0).unwrap();

        let view = handle_step_forward(
            &StepForward {
                correlation_id: Uuid::new_v4(),
            },
            &session,
        )
        .unwrap();

        assert_eq!(view.overlay, Overlay::Closed);
        assert_eq!(view.state, PlayerState::Closed);
        assert!(!session.is_ticking().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_hold_and_resume() {
        let session = session(&[2]);
        open(&session, 0).unwrap();

        let held = handle_hold_playback(
            &HoldPlayback {
                correlation_id: Uuid::new_v4(),
            },
            &session,
        )
        .unwrap();
        let resumed = handle_resume_playback(
            &ResumePlayback {
                correlation_id: Uuid::new_v4(),
            },
            &session,
        )
        .unwrap();

        assert_eq!(held.state, PlayerState::Held);
        assert_eq!(resumed.state, PlayerState::Playing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_close_story_when_already_closed_is_noop() {
        let session = session(&[2]);

        let view = handle_close_story(
            &CloseStory {
                correlation_id: Uuid::new_v4(),
            },
            &session,
        )
        .unwrap();

        assert_eq!(view.overlay, Overlay::Closed);
        assert_eq!(view.state, PlayerState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigation_while_closed_is_ignored() {
        let session = session(&[2]);

        let view = handle_step_forward(
            &StepForward {
                correlation_id: Uuid::new_v4(),
            },
            &session,
        )
        .unwrap();

        assert_eq!(view.state, PlayerState::Closed);
        assert_eq!(view.current_post, None);
    }
}
