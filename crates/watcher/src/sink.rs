//! Where captured clipboard content goes.

use clipdeck_history::{CapturedImage, HistoryStore, PushOutcome};

/// Receiver of captures, normally the [`HistoryStore`].
pub trait CaptureSink: Send + Sync {
    fn push_text(&self, text: &str) -> PushOutcome;

    fn push_image(&self, image: &CapturedImage) -> PushOutcome;
}

impl CaptureSink for HistoryStore {
    fn push_text(&self, text: &str) -> PushOutcome {
        HistoryStore::push_text(self, text)
    }

    fn push_image(&self, image: &CapturedImage) -> PushOutcome {
        HistoryStore::push_image(self, image)
    }
}
