//! On-disk blob directories.
//!
//! Two sibling directories hold the binary payloads the history document
//! only references: captured images keyed by entry id, and application icons
//! keyed by bundle id.

use crate::error::{HistoryError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct BlobStore {
    images_dir: PathBuf,
    icons_dir: PathBuf,
}

impl BlobStore {
    pub fn new(images_dir: impl Into<PathBuf>, icons_dir: impl Into<PathBuf>) -> Self {
        Self {
            images_dir: images_dir.into(),
            icons_dir: icons_dir.into(),
        }
    }

    /// `root/images` and `root/icons`.
    pub fn in_dir(root: &Path) -> Self {
        Self::new(root.join("images"), root.join("icons"))
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    pub fn icons_dir(&self) -> &Path {
        &self.icons_dir
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.images_dir, &self.icons_dir] {
            fs::create_dir_all(dir).map_err(|e| HistoryError::io(dir, e))?;
        }
        Ok(())
    }

    /// Where the image for entry `id` lives.
    pub fn image_path(&self, id: &str) -> PathBuf {
        self.images_dir.join(format!("{}.png", file_stem(id)))
    }

    pub fn write_image(&self, id: &str, png: &[u8]) -> Result<PathBuf> {
        let path = self.image_path(id);
        fs::create_dir_all(&self.images_dir).map_err(|e| HistoryError::io(&self.images_dir, e))?;
        fs::write(&path, png).map_err(|e| HistoryError::io(&path, e))?;
        Ok(path)
    }

    /// Read a blob. A missing file means "no preview", not an error.
    pub fn read(&self, path: &Path) -> Option<Vec<u8>> {
        match fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to read blob: {}", e);
                None
            }
        }
    }

    /// Remove an image blob owned by this store. Paths outside the images
    /// directory are left alone.
    pub fn remove_image(&self, path: &Path) {
        if !path.starts_with(&self.images_dir) {
            return;
        }
        match fs::remove_file(path) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed image blob"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %path.display(), "failed to remove image blob: {}", e),
        }
    }

    pub fn icon_path(&self, app_id: &str) -> PathBuf {
        self.icons_dir.join(format!("{}.png", file_stem(app_id)))
    }

    /// Return the cached icon for `app_id`, rendering it with `render` only
    /// when no icon is cached yet.
    pub fn cache_icon<F>(&self, app_id: &str, render: F) -> Option<PathBuf>
    where
        F: FnOnce() -> Option<Vec<u8>>,
    {
        let path = self.icon_path(app_id);
        if path.exists() {
            return Some(path);
        }

        let png = render()?;
        if let Err(e) = fs::create_dir_all(&self.icons_dir).and_then(|_| fs::write(&path, png)) {
            tracing::warn!(app_id, "failed to cache app icon: {}", e);
            return None;
        }
        Some(path)
    }
}

/// Turn an id into a safe file name component.
fn file_stem(id: &str) -> String {
    id.chars()
        .map(|c| match c {
            ':' | '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
