//! Clipboard history data model.

use crate::error::HistoryError;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// What a captured clipboard snapshot contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipKind {
    Text,
    Link,
    Code,
    Image,
    File,
}

impl ClipKind {
    pub const ALL: [ClipKind; 5] = [
        ClipKind::Text,
        ClipKind::Link,
        ClipKind::Code,
        ClipKind::Image,
        ClipKind::File,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ClipKind::Text => "text",
            ClipKind::Link => "link",
            ClipKind::Code => "code",
            ClipKind::Image => "image",
            ClipKind::File => "file",
        }
    }
}

impl std::fmt::Display for ClipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ClipKind {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ClipKind::ALL
            .into_iter()
            .find(|kind| kind.label() == wanted)
            .ok_or_else(|| HistoryError::UnknownKind(s.to_string()))
    }
}

/// One captured clipboard snapshot.
///
/// Field names follow the persisted document layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipItem {
    /// Content fingerprint, unique within the store
    pub id: String,

    pub kind: ClipKind,

    /// Trimmed captured string (all kinds except images)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// PNG blob location (images only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<PathBuf>,

    /// Capture time, millisecond precision
    #[serde(rename = "ts", with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub pinned: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_app_name: Option<String>,

    #[serde(
        rename = "sourceAppID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_app_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_icon_path: Option<PathBuf>,

    /// Number of successful paste-backs (display only)
    #[serde(default, skip_serializing_if = "is_zero")]
    pub use_count: u32,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl ClipItem {
    /// A text-like entry captured at `timestamp`.
    pub fn text(
        id: impl Into<String>,
        kind: ClipKind,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            text: Some(text.into()),
            image_path: None,
            timestamp,
            pinned: false,
            source_app_name: None,
            source_app_id: None,
            source_icon_path: None,
            use_count: 0,
        }
    }

    /// An image entry referencing the blob at `image_path`.
    pub fn image(id: impl Into<String>, image_path: PathBuf, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            kind: ClipKind::Image,
            text: None,
            image_path: Some(image_path),
            timestamp,
            pinned: false,
            source_app_name: None,
            source_app_id: None,
            source_icon_path: None,
            use_count: 0,
        }
    }

    pub fn is_image(&self) -> bool {
        self.kind == ClipKind::Image
    }

    /// Single-line preview for list rendering.
    pub fn preview(&self, max_chars: usize) -> String {
        match &self.text {
            Some(text) => {
                let line = text.lines().next().unwrap_or_default();
                let mut preview: String = line.chars().take(max_chars).collect();
                if line.chars().count() > max_chars || text.lines().nth(1).is_some() {
                    preview.push('…');
                }
                preview
            }
            None => format!("[{}]", self.kind),
        }
    }
}

/// Current time truncated to what the persisted document can represent.
pub fn capture_time() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
