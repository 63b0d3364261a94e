//! Service layer for clipdeck.
//!
//! [`ClipService`] owns the history store, the clipboard watcher and the
//! paste coordinator, and is the surface a presentation layer talks to.
//! [`Settings`] and [`AppPaths`] describe how it is configured and where it
//! keeps its files.

mod paths;
mod service;
mod settings;

pub use clipdeck_history::{ClipItem, ClipKind, HistoryQuery};
pub use clipdeck_paste::{PasteError, PasteMode, PasteOutcome};
pub use paths::{AppPaths, DATA_DIR_ENV};
pub use service::{ClipService, Platform};
pub use settings::{PasteSettings, Settings, SettingsError};
