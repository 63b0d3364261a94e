//! Seams between the watcher and the host clipboard.

use crate::error::Result;
use clipdeck_history::CapturedImage;

/// Read side of the host clipboard.
///
/// Reads are best-effort: an unavailable clipboard or an absent
/// representation is `None`, never an error.
pub trait ClipboardSource: Send + Sync {
    /// Counter bumped by the host on every clipboard write, ours included.
    fn change_count(&self) -> u64;

    fn read_image(&self) -> Option<CapturedImage>;

    /// File or web URL reference, as a string.
    fn read_url(&self) -> Option<String>;

    fn read_text(&self) -> Option<String>;
}

/// Write side of the host clipboard.
///
/// Each write returns the change counter observed right after it, which is
/// what the watcher expects to see for that write.
pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> Result<u64>;

    fn write_image(&self, image: &CapturedImage) -> Result<u64>;
}
