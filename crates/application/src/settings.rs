//! User settings, stored as `settings.json` in the data directory.

use clipdeck_context::DEFAULT_IGNORED_APPS;
use clipdeck_history::DEFAULT_MAX_ITEMS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Error reading or writing the settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Cap on retained history entries; pinned entries are exempt.
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// Age in days after which unpinned entries are pruned.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Bundle IDs whose clipboard writes are never recorded.
    #[serde(default = "default_ignored_app_ids")]
    pub ignored_app_ids: Vec<String>,

    #[serde(default)]
    pub paste: PasteSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteSettings {
    /// Delay before re-activating the paste target.
    #[serde(default = "default_activate_delay_ms")]
    pub activate_delay_ms: u64,

    /// Delay between re-activation and the paste chord.
    #[serde(default = "default_chord_delay_ms")]
    pub chord_delay_ms: u64,
}

fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}

fn default_retention_days() -> u32 {
    30
}

fn default_poll_interval_ms() -> u64 {
    300
}

fn default_ignored_app_ids() -> Vec<String> {
    DEFAULT_IGNORED_APPS.iter().map(|id| id.to_string()).collect()
}

fn default_activate_delay_ms() -> u64 {
    60
}

fn default_chord_delay_ms() -> u64 {
    80
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
            retention_days: default_retention_days(),
            poll_interval_ms: default_poll_interval_ms(),
            ignored_app_ids: default_ignored_app_ids(),
            paste: PasteSettings::default(),
        }
    }
}

impl Default for PasteSettings {
    fn default() -> Self {
        Self {
            activate_delay_ms: default_activate_delay_ms(),
            chord_delay_ms: default_chord_delay_ms(),
        }
    }
}

impl Settings {
    /// Read settings from `path`. A missing file yields defaults.
    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let settings: Settings =
            serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(settings.normalized())
    }

    /// Like [`Settings::read`], but an unreadable file falls back to defaults.
    pub fn load_or_default(path: &Path) -> Self {
        Self::read(path).unwrap_or_else(|e| {
            tracing::warn!("{}; using default settings", e);
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(io_err)
    }

    /// Clamp values that would disable the service.
    pub fn normalized(mut self) -> Self {
        self.max_items = self.max_items.max(1);
        self.poll_interval_ms = self.poll_interval_ms.max(10);
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn retention(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.retention_days))
    }
}
