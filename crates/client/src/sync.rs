//! Trailing-edge debounce for the background cart sync.
//!
//! Rapid quantity edits each produce a full cart snapshot; sending every
//! one would hammer the server, so snapshots within a quiescence window
//! collapse into a single call carrying the latest one (last-write-wins).
//!
//! The primitive is deliberately explicit: one pending task handle that
//! is replaced, never accumulated. The timer runs on the tokio runtime
//! the session lives on; replacing the handle also aborts a body that is
//! already executing, so two bodies never run concurrently and the
//! latest snapshot always wins.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Quiescence window for the cart sync.
pub const SYNC_QUIESCENCE: Duration = Duration::from_millis(1000);

/// Trailing-edge debouncer.
///
/// Each [`call`](Self::call) aborts the previously scheduled work and
/// schedules the new body after the window. A body that is already
/// running is cancelled at its next await point; the replacement
/// carries a newer snapshot, so the interrupted work is superseded,
/// not lost.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Create a debouncer with the given quiescence window.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Schedule `work` to run after the quiescence window, aborting any
    /// previously scheduled work, fired or not.
    pub fn call<F>(&mut self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }

        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            work.await;
        }));
    }

    /// Drop the scheduled work without running it.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// True while work is scheduled or still running.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
