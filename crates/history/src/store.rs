//! The authoritative clipboard history.

use crate::attribution::{Attribution, SourceAttributor};
use crate::blobs::BlobStore;
use crate::classify::classify;
use crate::fingerprint::{image_fingerprint, normalize_text, text_fingerprint, CapturedImage};
use crate::model::{capture_time, ClipItem};
use crate::persist::HistoryPersistence;
use crate::query::{display_order, HistoryQuery};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};

/// Default cap on retained entries.
pub const DEFAULT_MAX_ITEMS: usize = 200;

/// Result of a capture push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// A new entry was inserted at the front.
    Inserted(ClipItem),
    /// Content already present under this id; nothing changed.
    Duplicate(String),
    /// Inserted, then dropped again by eviction because every other entry
    /// is pinned.
    Evicted(String),
    /// Nothing to capture (empty text or an unreadable bitmap).
    Skipped,
}

impl PushOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, PushOutcome::Inserted(_))
    }
}

struct StoreState {
    /// Storage order: newest captures and fresh pins at the front
    items: Vec<ClipItem>,
    max_items: usize,
}

/// Deduplicated, ordered, persisted collection of clipboard entries.
///
/// Every mutation runs under one lock, including attribution and the
/// persistence hand-off, so icon caching and document writes never race.
/// Persistence failures are logged; the in-memory collection stays
/// authoritative.
pub struct HistoryStore {
    state: Mutex<StoreState>,
    persistence: Arc<dyn HistoryPersistence>,
    attributor: Arc<dyn SourceAttributor>,
    blobs: BlobStore,
}

impl HistoryStore {
    /// Load the persisted history. A missing or unreadable document starts
    /// an empty history.
    pub fn open(
        persistence: Arc<dyn HistoryPersistence>,
        attributor: Arc<dyn SourceAttributor>,
        blobs: BlobStore,
        max_items: usize,
    ) -> Self {
        let items = match persistence.load() {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("failed to load history, starting empty: {}", e);
                Vec::new()
            }
        };

        if let Err(e) = blobs.ensure_dirs() {
            tracing::warn!("failed to create blob directories: {}", e);
        }

        tracing::info!(entries = items.len(), max_items, "history loaded");

        let store = Self {
            state: Mutex::new(StoreState { items, max_items }),
            persistence,
            attributor,
            blobs,
        };
        {
            let mut state = store.lock();
            let evicted = store.evict(&mut state);
            if evicted > 0 {
                tracing::info!(evicted, max_items, "loaded history exceeded the limit");
                store.persist(&state.items);
            }
        }
        store
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, items: &[ClipItem]) {
        if let Err(e) = self.persistence.save(items) {
            tracing::warn!("failed to persist history: {}", e);
        }
    }

    pub fn blobs(&self) -> &BlobStore {
        &self.blobs
    }

    /// Capture a string. Trimmed; empty input is ignored.
    pub fn push_text(&self, raw: &str) -> PushOutcome {
        let text = normalize_text(raw);
        if text.is_empty() {
            return PushOutcome::Skipped;
        }

        let id = text_fingerprint(text);
        let mut state = self.lock();
        if state.items.iter().any(|item| item.id == id) {
            tracing::trace!(%id, "duplicate text capture");
            return PushOutcome::Duplicate(id);
        }

        let mut item = ClipItem::text(id, classify(text), text, capture_time());
        self.attach_source(&mut item);
        tracing::debug!(id = %item.id, kind = %item.kind, "captured text");

        self.insert_front(&mut state, item)
    }

    /// Capture a bitmap. Re-encoded to PNG before hashing so the same
    /// pixels always map to the same entry.
    pub fn push_image(&self, image: &CapturedImage) -> PushOutcome {
        let png = match image.to_png() {
            Ok(png) => png,
            Err(e) => {
                tracing::warn!("failed to canonicalize clipboard image: {}", e);
                return PushOutcome::Skipped;
            }
        };

        let id = image_fingerprint(&png);
        let mut state = self.lock();
        if state.items.iter().any(|item| item.id == id) {
            tracing::trace!(%id, "duplicate image capture");
            return PushOutcome::Duplicate(id);
        }

        let path = match self.blobs.write_image(&id, &png) {
            Ok(path) => path,
            Err(e) => {
                // Entry stays usable without a preview
                tracing::warn!(%id, "failed to store image blob: {}", e);
                self.blobs.image_path(&id)
            }
        };

        let mut item = ClipItem::image(id, path, capture_time());
        self.attach_source(&mut item);
        tracing::debug!(id = %item.id, width = image.width, height = image.height, "captured image");

        self.insert_front(&mut state, item)
    }

    fn attach_source(&self, item: &mut ClipItem) {
        if let Some(Attribution {
            app_name,
            app_id,
            icon_path,
        }) = self.attributor.attribute()
        {
            item.source_app_name = app_name;
            item.source_app_id = app_id;
            item.source_icon_path = icon_path;
        }
    }

    fn insert_front(&self, state: &mut StoreState, item: ClipItem) -> PushOutcome {
        let id = item.id.clone();
        state.items.insert(0, item.clone());
        let evicted = self.evict(state);
        if evicted > 0 {
            tracing::debug!(evicted, "evicted oldest entries");
        }
        self.persist(&state.items);

        if state.items.iter().any(|existing| existing.id == id) {
            PushOutcome::Inserted(item)
        } else {
            tracing::debug!(%id, "new entry evicted, history is all pins");
            PushOutcome::Evicted(id)
        }
    }

    /// Drop unpinned entries from the tail until the size cap holds.
    /// Pinned entries are never evicted, so a history made only of pins may
    /// exceed the cap.
    fn evict(&self, state: &mut StoreState) -> usize {
        let mut evicted = 0;
        let mut idx = state.items.len();
        while state.items.len() > state.max_items && idx > 0 {
            idx -= 1;
            if state.items[idx].pinned {
                continue;
            }
            let removed = state.items.remove(idx);
            self.discard_blob(&removed);
            evicted += 1;
        }
        evicted
    }

    fn discard_blob(&self, item: &ClipItem) {
        if let Some(path) = &item.image_path {
            self.blobs.remove_image(path);
        }
    }

    /// Flip the pin flag. Pinning moves the entry to the front of storage.
    ///
    /// Returns the new pin state, or `None` for an unknown id.
    pub fn toggle_pin(&self, id: &str) -> Option<bool> {
        let mut state = self.lock();
        let idx = state.items.iter().position(|item| item.id == id)?;

        let pinned = !state.items[idx].pinned;
        state.items[idx].pinned = pinned;
        if pinned {
            let item = state.items.remove(idx);
            state.items.insert(0, item);
        }

        tracing::debug!(%id, pinned, "toggled pin");
        self.persist(&state.items);
        Some(pinned)
    }

    /// Remove one entry. Returns whether it existed.
    pub fn delete(&self, id: &str) -> bool {
        let mut state = self.lock();
        let Some(idx) = state.items.iter().position(|item| item.id == id) else {
            return false;
        };

        let removed = state.items.remove(idx);
        self.discard_blob(&removed);
        tracing::debug!(%id, "deleted entry");
        self.persist(&state.items);
        true
    }

    /// Remove every entry, pinned or not. Returns how many were removed.
    pub fn clear_all(&self) -> usize {
        let mut state = self.lock();
        let removed: Vec<ClipItem> = state.items.drain(..).collect();
        for item in &removed {
            self.discard_blob(item);
        }
        tracing::info!(removed = removed.len(), "cleared history");
        self.persist(&state.items);
        removed.len()
    }

    /// Bump the paste counter. Returns the new count.
    pub fn increment_use_count(&self, id: &str) -> Option<u32> {
        let mut state = self.lock();
        let item = state.items.iter_mut().find(|item| item.id == id)?;
        item.use_count = item.use_count.saturating_add(1);
        let count = item.use_count;
        self.persist(&state.items);
        Some(count)
    }

    /// Remove entries captured before `cutoff`. Survivors keep their
    /// position, id and timestamp.
    pub fn prune_older_than(&self, cutoff: DateTime<Utc>, keep_pinned: bool) -> usize {
        let mut state = self.lock();
        let before = state.items.len();

        let mut expired = Vec::new();
        state.items.retain(|item| {
            let keep = item.timestamp >= cutoff || (keep_pinned && item.pinned);
            if !keep {
                expired.push(item.clone());
            }
            keep
        });
        for item in &expired {
            self.discard_blob(item);
        }

        let pruned = before - state.items.len();
        if pruned > 0 {
            tracing::info!(pruned, %cutoff, "pruned old entries");
            self.persist(&state.items);
        }
        pruned
    }

    /// Change the size cap and evict immediately. Returns how many entries
    /// were evicted.
    pub fn set_max_items(&self, max_items: usize) -> usize {
        let mut state = self.lock();
        state.max_items = max_items;
        let evicted = self.evict(&mut state);
        if evicted > 0 {
            tracing::info!(evicted, max_items, "evicted after limit change");
            self.persist(&state.items);
        }
        evicted
    }

    pub fn max_items(&self) -> usize {
        self.lock().max_items
    }

    /// Entries in storage order.
    pub fn items(&self) -> Vec<ClipItem> {
        self.lock().items.clone()
    }

    pub fn get(&self, id: &str) -> Option<ClipItem> {
        self.lock().items.iter().find(|item| item.id == id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().items.iter().any(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    /// Display-ordered entries passing `query`.
    pub fn query(&self, query: &HistoryQuery) -> Vec<ClipItem> {
        self.query_at(query, Utc::now())
    }

    /// Like [`HistoryStore::query`], with time labels computed against `now`.
    pub fn query_at(&self, query: &HistoryQuery, now: DateTime<Utc>) -> Vec<ClipItem> {
        let items = self.items();
        display_order(&items)
            .into_iter()
            .filter(|item| query.matches(item, now))
            .collect()
    }

    /// PNG bytes of an image entry, or `None` when the blob is gone.
    pub fn image_bytes(&self, item: &ClipItem) -> Option<Vec<u8>> {
        self.blobs.read(item.image_path.as_deref()?)
    }

    /// Wait for pending document writes.
    pub fn flush(&self) {
        if let Err(e) = self.persistence.flush() {
            tracing::warn!("failed to flush history: {}", e);
        }
    }
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("HistoryStore")
            .field("entries", &state.items.len())
            .field("max_items", &state.max_items)
            .finish_non_exhaustive()
    }
}
