//! Read-only views over the history: display order and filtering.

use crate::model::{ClipItem, ClipKind};
use chrono::{DateTime, Utc};

/// Fixed search token that image entries answer to.
pub const IMAGE_SEARCH_TOKEN: &str = "image picture";

/// Filter for [`crate::HistoryStore::query`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Only entries of this kind
    pub kind: Option<ClipKind>,
    /// Case-insensitive substring
    pub text: Option<String>,
}

impl HistoryQuery {
    /// Matches every entry.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: ClipKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Whether `item` passes this filter, with time labels relative to `now`.
    pub fn matches(&self, item: &ClipItem, now: DateTime<Utc>) -> bool {
        if self.kind.is_some_and(|kind| kind != item.kind) {
            return false;
        }

        let needle = self
            .text
            .as_deref()
            .map(|t| t.trim().to_lowercase())
            .unwrap_or_default();
        if needle.is_empty() {
            return true;
        }

        if time_ago_label(item.timestamp, now).contains(&needle) {
            return true;
        }

        if item.is_image() {
            IMAGE_SEARCH_TOKEN.contains(&needle)
        } else {
            item.text
                .as_deref()
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        }
    }
}

/// Pinned first, then newest first. Ties keep storage order.
pub fn display_order(items: &[ClipItem]) -> Vec<ClipItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        b.pinned
            .cmp(&a.pinned)
            .then_with(|| b.timestamp.cmp(&a.timestamp))
    });
    sorted
}

/// Human "time elapsed" label, e.g. `"5m ago"`.
pub fn time_ago_label(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - timestamp).num_seconds().max(0);
    match seconds {
        s if s < 60 => format!("{s}s ago"),
        s if s < 3_600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3_600),
        s if s < 86_400 * 7 => format!("{}d ago", s / 86_400),
        _ => timestamp.format("%Y-%m-%d").to_string(),
    }
}
