//! Background poll task driving [`ClipboardWatcher::tick`].

use crate::watcher::{ClipboardWatcher, TickOutcome};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Default clipboard polling interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(300);

/// Controls the poll task.
///
/// Restartable: each `start()` creates a fresh CancellationToken, so
/// `stop()` followed by `start()` works.
pub struct WatcherHandle {
    running: Arc<AtomicBool>,
    cancel_token: Mutex<CancellationToken>,
}

impl WatcherHandle {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            cancel_token: Mutex::new(CancellationToken::new()),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Spawn the poll task on the current tokio runtime.
    ///
    /// Returns `false` if the task is already running.
    pub fn start(&self, watcher: Arc<ClipboardWatcher>, interval: Duration) -> bool {
        if self.running.swap(true, Ordering::AcqRel) {
            tracing::warn!("clipboard watcher already running");
            return false;
        }

        let token = CancellationToken::new();
        let child = token.child_token();
        if let Ok(mut current) = self.cancel_token.lock() {
            *current = token;
        }

        tokio::spawn(poll_loop(watcher, interval, child));
        true
    }

    pub fn stop(&self) {
        if let Ok(token) = self.cancel_token.lock() {
            token.cancel();
        }
        self.running.store(false, Ordering::Release);
    }
}

impl Default for WatcherHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for WatcherHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_loop(watcher: Arc<ClipboardWatcher>, interval: Duration, cancel: CancellationToken) {
    tracing::info!(?interval, "clipboard watcher started");

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut captured = 0u64;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        // Clipboard reads and PNG encoding block; keep them off the reactor
        let w = Arc::clone(&watcher);
        match tokio::task::spawn_blocking(move || w.tick()).await {
            Ok(TickOutcome::Captured(outcome)) if outcome.is_inserted() => captured += 1,
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "clipboard poll tick failed"),
        }
    }

    tracing::info!(captured, "clipboard watcher stopped");
}
