//! Error types for clipboard access.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WatcherError>;

#[derive(Debug, Error)]
pub enum WatcherError {
    /// The system clipboard could not be opened.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// Writing to the clipboard failed.
    #[error("failed to write clipboard: {0}")]
    WriteFailed(String),
}
