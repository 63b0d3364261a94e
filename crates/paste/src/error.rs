//! Error types for paste-back.

use clipdeck_input::InputError;
use clipdeck_watcher::WatcherError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasteError {
    /// No history entry with this id.
    #[error("no history entry with id {0}")]
    UnknownItem(String),

    /// The clipboard write failed.
    #[error(transparent)]
    Clipboard(#[from] WatcherError),

    /// The paste key-chord could not be sent.
    #[error(transparent)]
    Input(#[from] InputError),
}
