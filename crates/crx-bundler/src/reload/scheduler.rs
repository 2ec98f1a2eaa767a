//! Debounced `update` pushes.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;

use super::channel::{ReloadChannel, ReloadMessage};

/// Schedules an `update` broadcast a fixed delay after each finished build.
///
/// Every call starts a new window; only the last window to expire broadcasts,
/// so a burst of builds produces one push.
#[derive(Debug, Clone)]
pub struct UpdateScheduler {
    channel: ReloadChannel,
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl UpdateScheduler {
    pub fn new(channel: ReloadChannel, delay: Duration) -> Self {
        Self {
            channel,
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule a push on the current tokio runtime.
    ///
    /// Returns `false` when called outside a runtime; nothing is scheduled.
    pub fn schedule(&self) -> bool {
        let Ok(handle) = Handle::try_current() else {
            tracing::warn!("no async runtime available; skipping reload notification");
            return false;
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = Arc::clone(&self.generation);
        let channel = self.channel.clone();
        let delay = self.delay;

        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if latest.load(Ordering::SeqCst) != generation {
                return;
            }
            let delivered = channel.broadcast(ReloadMessage::Update);
            tracing::debug!(clients = delivered, "update pushed");
        });

        true
    }
}
