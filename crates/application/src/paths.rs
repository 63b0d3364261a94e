//! On-disk layout of the data directory.

use clipdeck_history::BlobStore;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "CLIPDECK_DATA_DIR";

/// ```text
/// <root>/
///   history.json
///   settings.json
///   images/<id>.png
///   icons/<bundle id>.png
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    root: PathBuf,
}

impl AppPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `$CLIPDECK_DATA_DIR`, or `clipdeck` under the platform data directory.
    pub fn from_env() -> Self {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            return Self::new(dir);
        }
        Self::new(
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("clipdeck"),
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn history_file(&self) -> PathBuf {
        self.root.join("history.json")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.root.join("settings.json")
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    pub fn icons_dir(&self) -> PathBuf {
        self.root.join("icons")
    }

    pub fn blobs(&self) -> BlobStore {
        BlobStore::new(self.images_dir(), self.icons_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let paths = AppPaths::new("/data/clipdeck");
        assert_eq!(paths.history_file(), Path::new("/data/clipdeck/history.json"));
        assert_eq!(paths.settings_file(), Path::new("/data/clipdeck/settings.json"));
        assert_eq!(paths.blobs().images_dir(), Path::new("/data/clipdeck/images"));
        assert_eq!(paths.blobs().icons_dir(), Path::new("/data/clipdeck/icons"));
    }
}
