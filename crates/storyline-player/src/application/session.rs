//! Playback session: the navigator plus the ticker that drives it.
//!
//! All mutation goes through [`PlaybackSession::apply`], which holds the
//! session lock for the duration of one input, then re-arms the ticker:
//! a ticker armed for an older epoch, or for a player that is no longer
//! playing, is aborted before a new one is spawned. At most one ticker is
//! armed at any time.

use std::sync::{Arc, Mutex, MutexGuard};

use storyline_catalog::domain::story::StoryLine;
use storyline_core::clock::Clock;
use storyline_core::error::DomainError;
use storyline_core::event::DomainEvent;
use tokio::runtime::Handle;
use tracing::{debug, info, trace};

use super::ticker::Ticker;
use crate::domain::config::PlaybackConfig;
use crate::domain::player::{StoryPlayer, Transition};
use crate::domain::story_line::StoryLineNavigator;

struct SessionState {
    navigator: StoryLineNavigator,
    ticker: Option<Ticker>,
}

struct SessionInner {
    state: Mutex<SessionState>,
    clock: Arc<dyn Clock>,
    runtime: Handle,
}

/// Shared handle to one story line and its player.
#[derive(Clone)]
pub struct PlaybackSession {
    inner: Arc<SessionInner>,
}

impl std::fmt::Debug for PlaybackSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackSession").finish_non_exhaustive()
    }
}

impl PlaybackSession {
    /// Creates a session with the overlay closed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` when called outside a tokio
    /// runtime.
    pub fn new(
        story_line: Arc<StoryLine>,
        config: PlaybackConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, DomainError> {
        let runtime = Handle::try_current()
            .map_err(|e| DomainError::Infrastructure(format!("no tokio runtime: {e}")))?;
        let navigator = StoryLineNavigator::new(story_line, StoryPlayer::new(config));
        Ok(Self {
            inner: Arc::new(SessionInner {
                state: Mutex::new(SessionState {
                    navigator,
                    ticker: None,
                }),
                clock,
                runtime,
            }),
        })
    }

    /// Applies one input to the navigator under the session lock, logs the
    /// resulting events and re-arms the ticker.
    ///
    /// # Errors
    ///
    /// Returns whatever `input` returns, or `DomainError::Infrastructure` if
    /// the session lock is poisoned.
    pub fn apply<R>(
        &self,
        input: impl FnOnce(&mut StoryLineNavigator, &dyn Clock) -> Result<R, DomainError>,
    ) -> Result<R, DomainError> {
        let mut state = self.inner.lock()?;
        let result = input(&mut state.navigator, self.inner.clock.as_ref());
        self.inner.settle(&mut state);
        result
    }

    /// Reads the navigator under the session lock.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the session lock is poisoned.
    pub fn read<R>(&self, view: impl FnOnce(&StoryLineNavigator) -> R) -> Result<R, DomainError> {
        let state = self.inner.lock()?;
        Ok(view(&state.navigator))
    }

    /// Whether a ticker is currently armed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the session lock is poisoned.
    pub fn is_ticking(&self) -> Result<bool, DomainError> {
        let state = self.inner.lock()?;
        Ok(state.ticker.is_some())
    }
}

impl SessionInner {
    fn lock(&self) -> Result<MutexGuard<'_, SessionState>, DomainError> {
        self.state
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("session mutex poisoned: {e}")))
    }

    /// Ticker callback. Returns `false` once this epoch no longer owns the
    /// clock, which ends the ticker task.
    fn on_tick(self: &Arc<Self>, epoch: u64) -> bool {
        let Ok(mut state) = self.state.lock() else {
            return false;
        };
        let transition = state.navigator.tick(epoch, self.clock.as_ref());
        trace!(epoch, ?transition, "tick");
        if transition == Transition::Ignored {
            debug!(epoch, "dropped stale tick");
        }
        self.settle(&mut state);
        let player = state.navigator.player();
        player.is_clock_live() && player.clock_epoch() == epoch
    }

    fn settle(self: &Arc<Self>, state: &mut SessionState) {
        for event in state.navigator.player_mut().take_events() {
            let meta = event.metadata();
            info!(
                event_type = event.event_type(),
                activation_id = %meta.activation_id,
                sequence_number = meta.sequence_number,
                correlation_id = %meta.correlation_id,
                payload = %event.to_payload(),
                "playback event"
            );
        }
        self.rearm(state);
    }

    fn rearm(self: &Arc<Self>, state: &mut SessionState) {
        let player = state.navigator.player();
        let epoch = player.clock_epoch();
        let live = player.is_clock_live();
        let period = player.config().tick_interval();

        if let Some(stale) = state
            .ticker
            .take_if(|ticker| !live || ticker.epoch() != epoch)
        {
            debug!(stale_epoch = stale.epoch(), epoch, "cancelling ticker");
            drop(stale);
        }

        if live && state.ticker.is_none() {
            debug!(epoch, ?period, "arming ticker");
            let weak = Arc::downgrade(self);
            state.ticker = Some(Ticker::spawn(&self.runtime, epoch, period, move |epoch| {
                weak.upgrade().is_some_and(|inner| inner.on_tick(epoch))
            }));
        }
    }
}
