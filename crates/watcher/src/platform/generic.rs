//! Portable clipboard backed by arboard.
//!
//! Most hosts expose no change counter, so one is synthesized: every poll
//! fingerprints the current content and bumps the counter when it differs
//! from the previous poll.

use super::{get_image, get_text, set_image, set_text};
use crate::error::Result;
use crate::source::{ClipboardSource, ClipboardWriter};
use clipdeck_history::{image_fingerprint, text_fingerprint, CapturedImage};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Counter {
    digest: Option<String>,
    count: u64,
}

impl Counter {
    fn observe(&mut self, digest: Option<String>) -> u64 {
        if digest != self.digest {
            self.digest = digest;
            self.count += 1;
        }
        self.count
    }

    /// Count a write we just made as exactly one change.
    fn record(&mut self, digest: Option<String>) -> u64 {
        self.digest = digest;
        self.count += 1;
        self.count
    }
}

#[derive(Debug)]
pub struct ArboardClipboard {
    counter: Mutex<Counter>,
}

impl ArboardClipboard {
    pub fn new() -> Self {
        Self {
            counter: Mutex::new(Counter {
                digest: current_digest(),
                count: 0,
            }),
        }
    }

    fn counter(&self) -> MutexGuard<'_, Counter> {
        self.counter.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ArboardClipboard {
    fn default() -> Self {
        Self::new()
    }
}

/// Content fingerprint used only for change detection.
fn current_digest() -> Option<String> {
    if let Some(text) = get_text() {
        return Some(text_fingerprint(&text));
    }
    get_image().map(|image| image_fingerprint(&image.rgba))
}

impl ClipboardSource for ArboardClipboard {
    fn change_count(&self) -> u64 {
        let digest = current_digest();
        self.counter().observe(digest)
    }

    fn read_image(&self) -> Option<CapturedImage> {
        get_image()
    }

    fn read_url(&self) -> Option<String> {
        None
    }

    fn read_text(&self) -> Option<String> {
        get_text()
    }
}

impl ClipboardWriter for ArboardClipboard {
    // The counter stays locked across the write so a concurrent poll
    // cannot count our content as a separate change.
    fn write_text(&self, text: &str) -> Result<u64> {
        let mut counter = self.counter();
        set_text(text)?;
        Ok(counter.record(current_digest()))
    }

    fn write_image(&self, image: &CapturedImage) -> Result<u64> {
        let mut counter = self.counter();
        set_image(image)?;
        Ok(counter.record(current_digest()))
    }
}
