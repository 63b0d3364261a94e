//! Clipboard history for clipdeck.
//!
//! Captures are fingerprinted by content, so recapturing the same text or
//! pixels never creates a second entry. The collection is kept in storage
//! order (newest capture or fresh pin first) and persisted as one JSON
//! document; image payloads and app icons live as PNG blobs next to it.

mod attribution;
mod blobs;
mod classify;
mod error;
mod fingerprint;
mod model;
mod persist;
mod query;
mod store;

pub use attribution::{AppAttributor, Attribution, NoAttribution, SourceAttributor};
pub use blobs::BlobStore;
pub use classify::{classify, CODE_FENCE, CODE_MARKERS, FILE_URL_PREFIX, LINK_PREFIXES};
pub use error::{HistoryError, Result};
pub use fingerprint::{
    image_fingerprint, normalize_text, text_fingerprint, CapturedImage, IMAGE_ID_PREFIX,
    TEXT_ID_PREFIX,
};
pub use model::{capture_time, ClipItem, ClipKind};
pub use persist::{BackgroundWriter, HistoryPersistence, JsonDocument, MemoryDocument};
pub use query::{display_order, time_ago_label, HistoryQuery, IMAGE_SEARCH_TOKEN};
pub use store::{HistoryStore, PushOutcome, DEFAULT_MAX_ITEMS};
