//! Error types for the history store.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for history operations.
pub type Result<T> = std::result::Result<T, HistoryError>;

/// Errors raised by persistence, blob storage and image canonicalization.
///
/// The store's public mutations never surface these: they are logged and
/// the in-memory state stays authoritative.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Failed to read or write a file.
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// PNG encoding or decoding failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Bitmap dimensions don't match the pixel buffer.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Unrecognized content kind name.
    #[error("unknown content kind: {0}")]
    UnknownKind(String),

    /// The background persistence thread has exited.
    #[error("persistence worker stopped")]
    WorkerStopped,
}

impl HistoryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
