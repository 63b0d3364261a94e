//! The clipboard poll tick and self-write suppression.

use crate::error::Result;
use crate::sink::CaptureSink;
use crate::source::ClipboardSource;
use clipdeck_context::{is_ignored_app, ActiveAppProvider};
use clipdeck_history::PushOutcome;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

/// What a single [`ClipboardWatcher::tick`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Change counter unchanged since the last tick.
    Unchanged,
    /// The change was our own programmatic write.
    Suppressed,
    /// The frontmost application is on the ignore list.
    Ignored(String),
    /// A representation was forwarded to the sink.
    Captured(PushOutcome),
    /// The clipboard changed but holds nothing we capture.
    Empty,
}

#[derive(Debug, Default)]
struct WatchState {
    last_change: u64,
    /// Counter value our last programmatic write produced, until observed
    expected_self_write: Option<u64>,
}

/// Detects clipboard changes and forwards new content to a [`CaptureSink`].
///
/// Suppression records the exact change counter a programmatic write
/// produced. A tick only skips the change whose counter matches it, so an
/// external copy that lands after our write is still captured.
pub struct ClipboardWatcher {
    source: Arc<dyn ClipboardSource>,
    apps: Arc<dyn ActiveAppProvider>,
    sink: Arc<dyn CaptureSink>,
    ignored: RwLock<Vec<String>>,
    state: Mutex<WatchState>,
}

impl ClipboardWatcher {
    /// Whatever is on the clipboard at construction is treated as seen.
    pub fn new(
        source: Arc<dyn ClipboardSource>,
        apps: Arc<dyn ActiveAppProvider>,
        sink: Arc<dyn CaptureSink>,
        ignored: Vec<String>,
    ) -> Self {
        let last_change = source.change_count();
        Self {
            source,
            apps,
            sink,
            ignored: RwLock::new(ignored),
            state: Mutex::new(WatchState {
                last_change,
                expected_self_write: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, WatchState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_ignored_apps(&self, ignored: Vec<String>) {
        tracing::debug!(count = ignored.len(), "updated ignored applications");
        match self.ignored.write() {
            Ok(mut guard) => *guard = ignored,
            Err(poisoned) => *poisoned.into_inner() = ignored,
        }
    }

    pub fn ignored_apps(&self) -> Vec<String> {
        match self.ignored.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Skip the change that produces counter value `expected`.
    pub fn arm_suppression(&self, expected: u64) {
        self.lock().expected_self_write = Some(expected);
    }

    /// Run a programmatic clipboard write so that it is not recaptured.
    ///
    /// `write` returns the change counter after writing. The watcher state
    /// stays locked for the duration, so no tick can observe the write
    /// before its counter is recorded.
    pub fn write_suppressed<F>(&self, write: F) -> Result<u64>
    where
        F: FnOnce() -> Result<u64>,
    {
        let mut state = self.lock();
        let count = write()?;
        state.expected_self_write = Some(count);
        tracing::trace!(count, "armed self-write suppression");
        Ok(count)
    }

    /// Poll the clipboard once.
    pub fn tick(&self) -> TickOutcome {
        let count = self.source.change_count();
        {
            let mut state = self.lock();
            if count == state.last_change {
                return TickOutcome::Unchanged;
            }
            state.last_change = count;

            if let Some(expected) = state.expected_self_write {
                // A lower counter was read before our write landed; the
                // content is already ours, so keep waiting for `expected`.
                if count < expected {
                    tracing::trace!(count, expected, "counter behind our pending write");
                    return TickOutcome::Suppressed;
                }
                state.expected_self_write = None;
                if count == expected {
                    tracing::trace!(count, "skipped our own clipboard write");
                    return TickOutcome::Suppressed;
                }
                tracing::debug!(count, expected, "external copy superseded our write");
            }
        }

        if let Some(app) = self.apps.get_active_app() {
            if is_ignored_app(&app.bundle_id, &self.ignored_apps()) {
                tracing::debug!(bundle_id = %app.bundle_id, "clipboard change from ignored app");
                return TickOutcome::Ignored(app.bundle_id);
            }
        }

        self.capture()
    }

    /// Image, then URL or file reference, then plain string.
    fn capture(&self) -> TickOutcome {
        if let Some(image) = self.source.read_image() {
            return TickOutcome::Captured(self.sink.push_image(&image));
        }
        if let Some(url) = self.source.read_url() {
            return TickOutcome::Captured(self.sink.push_text(&url));
        }
        if let Some(text) = self.source.read_text() {
            return TickOutcome::Captured(self.sink.push_text(&text));
        }
        TickOutcome::Empty
    }
}

impl std::fmt::Debug for ClipboardWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("ClipboardWatcher")
            .field("last_change", &state.last_change)
            .field("expected_self_write", &state.expected_self_write)
            .finish_non_exhaustive()
    }
}
