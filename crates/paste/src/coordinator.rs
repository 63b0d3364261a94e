//! Replays a history entry into the application that had focus when the
//! panel opened.

use crate::error::PasteError;
use crate::keys::{KeyChordSender, NoPanel, PanelControl};
use clipdeck_context::{AppActivator, AppInfo};
use clipdeck_history::{CapturedImage, ClipItem, HistoryStore};
use clipdeck_watcher::{ClipboardWatcher, ClipboardWriter};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Default delay between the clipboard write and re-activating the target.
pub const DEFAULT_ACTIVATE_DELAY: Duration = Duration::from_millis(60);

/// Default delay between re-activation and the paste chord.
pub const DEFAULT_CHORD_DELAY: Duration = Duration::from_millis(80);

/// Which representation of an entry to paste.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PasteMode {
    /// Original representation: image bytes for image entries.
    #[default]
    Rich,
    /// Force text, when the entry has any.
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasteTiming {
    pub activate_delay: Duration,
    pub chord_delay: Duration,
}

impl PasteTiming {
    pub fn from_millis(activate_ms: u64, chord_ms: u64) -> Self {
        Self {
            activate_delay: Duration::from_millis(activate_ms),
            chord_delay: Duration::from_millis(chord_ms),
        }
    }
}

impl Default for PasteTiming {
    fn default() -> Self {
        Self {
            activate_delay: DEFAULT_ACTIVATE_DELAY,
            chord_delay: DEFAULT_CHORD_DELAY,
        }
    }
}

/// What a paste request did.
#[derive(Debug)]
pub struct PasteOutcome {
    /// Whether the clipboard was written.
    pub wrote: bool,
    /// Use count after this paste, when it was incremented.
    pub use_count: Option<u32>,
    /// Delayed activation and key-chord task, when a target was recorded.
    pub chord: Option<JoinHandle<()>>,
}

enum Payload {
    Text(String),
    Image(CapturedImage),
}

/// Writes an entry to the clipboard and pastes it into the recorded target.
pub struct PasteCoordinator {
    store: Arc<HistoryStore>,
    watcher: Arc<ClipboardWatcher>,
    clipboard: Arc<dyn ClipboardWriter>,
    activator: Arc<dyn AppActivator>,
    keys: Arc<dyn KeyChordSender>,
    panel: Arc<dyn PanelControl>,
    timing: PasteTiming,
}

impl PasteCoordinator {
    pub fn new(
        store: Arc<HistoryStore>,
        watcher: Arc<ClipboardWatcher>,
        clipboard: Arc<dyn ClipboardWriter>,
        activator: Arc<dyn AppActivator>,
        keys: Arc<dyn KeyChordSender>,
    ) -> Self {
        Self {
            store,
            watcher,
            clipboard,
            activator,
            keys,
            panel: Arc::new(NoPanel),
            timing: PasteTiming::default(),
        }
    }

    pub fn with_panel(mut self, panel: Arc<dyn PanelControl>) -> Self {
        self.panel = panel;
        self
    }

    pub fn with_timing(mut self, timing: PasteTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn timing(&self) -> PasteTiming {
        self.timing
    }

    /// Paste entry `id` into `target`.
    ///
    /// The clipboard is written synchronously. Re-activation and the key
    /// chord run later on a spawned task, so this must be called from
    /// within a tokio runtime. Without a target only the clipboard is
    /// written.
    pub fn paste(
        &self,
        id: &str,
        mode: PasteMode,
        target: Option<AppInfo>,
    ) -> Result<PasteOutcome, PasteError> {
        let item = self
            .store
            .get(id)
            .ok_or_else(|| PasteError::UnknownItem(id.to_string()))?;

        self.panel.hide();

        let Some(payload) = self.payload(&item, mode) else {
            tracing::debug!(%id, "entry has nothing to paste");
            return Ok(PasteOutcome {
                wrote: false,
                use_count: None,
                chord: None,
            });
        };

        self.watcher.write_suppressed(|| match &payload {
            Payload::Text(text) => self.clipboard.write_text(text),
            Payload::Image(image) => self.clipboard.write_image(image),
        })?;
        tracing::debug!(%id, ?mode, "wrote entry to clipboard");

        let chord = match target {
            Some(target) => Some(self.schedule_chord(target)),
            None => {
                tracing::debug!("no paste target recorded, clipboard only");
                None
            }
        };

        let use_count = self.store.increment_use_count(id);
        Ok(PasteOutcome {
            wrote: true,
            use_count,
            chord,
        })
    }

    fn payload(&self, item: &ClipItem, mode: PasteMode) -> Option<Payload> {
        let text = item.text.clone().map(Payload::Text);
        if mode == PasteMode::Plain && text.is_some() {
            return text;
        }
        if item.is_image() {
            // A missing or unreadable blob leaves nothing to paste
            let png = self.store.image_bytes(item)?;
            return match CapturedImage::from_png(&png) {
                Ok(image) => Some(Payload::Image(image)),
                Err(e) => {
                    tracing::warn!(id = %item.id, "failed to decode image blob: {}", e);
                    None
                }
            };
        }
        text
    }

    fn schedule_chord(&self, target: AppInfo) -> JoinHandle<()> {
        let activator = Arc::clone(&self.activator);
        let keys = Arc::clone(&self.keys);
        let timing = self.timing;

        tokio::spawn(async move {
            tokio::time::sleep(timing.activate_delay).await;
            if !activator.activate(&target) {
                tracing::debug!(bundle_id = %target.bundle_id, "paste target not activated");
            }

            tokio::time::sleep(timing.chord_delay).await;
            match tokio::task::spawn_blocking(move || keys.send_paste_chord()).await {
                Ok(Ok(())) => tracing::debug!(bundle_id = %target.bundle_id, "paste chord sent"),
                Ok(Err(e)) => tracing::warn!(error = %e, "failed to send paste chord"),
                Err(e) => tracing::warn!(error = %e, "paste chord task failed"),
            }
        })
    }
}
