//! Fixed-rate playback ticker.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

/// A repeating timer bound to one clock epoch. Dropping it aborts the task.
#[derive(Debug)]
pub(crate) struct Ticker {
    epoch: u64,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawns a task that calls `on_tick(epoch)` every `period`, starting one
    /// period from now, until the callback returns `false`.
    pub(crate) fn spawn<F>(runtime: &Handle, epoch: u64, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut(u64) -> bool + Send + 'static,
    {
        let start = Instant::now() + period;
        let handle = runtime.spawn(async move {
            let mut interval = interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if !on_tick(epoch) {
                    break;
                }
            }
        });
        Self { epoch, handle }
    }

    /// The epoch this ticker was armed for.
    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
