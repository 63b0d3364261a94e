//! Clipboard watching for clipdeck.
//!
//! The host clipboard offers no change notification, so a repeating task
//! polls its change counter and forwards new content to the history. Our own
//! paste-back writes are recorded by the counter value they produce and
//! skipped when the poll observes exactly that value.
//!
//! # Example
//!
//! ```ignore
//! use clipdeck_watcher::{ClipboardWatcher, WatcherHandle, DEFAULT_POLL_INTERVAL};
//!
//! let watcher = Arc::new(ClipboardWatcher::new(clipboard, apps, store, ignored));
//! let handle = WatcherHandle::new();
//! handle.start(watcher, DEFAULT_POLL_INTERVAL);
//! ```

mod error;
mod poller;
mod sink;
mod source;
mod watcher;

pub mod platform;

pub use error::{Result, WatcherError};
pub use poller::{WatcherHandle, DEFAULT_POLL_INTERVAL};
pub use sink::CaptureSink;
pub use source::{ClipboardSource, ClipboardWriter};
pub use watcher::{ClipboardWatcher, TickOutcome};
