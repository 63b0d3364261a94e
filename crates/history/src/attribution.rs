//! Best-effort attribution of captures to the foreground application.

use crate::blobs::BlobStore;
use clipdeck_context::{ActiveAppProvider, AppIconProvider};
use std::path::PathBuf;
use std::sync::Arc;

/// Which application produced a capture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attribution {
    pub app_name: Option<String>,
    pub app_id: Option<String>,
    pub icon_path: Option<PathBuf>,
}

/// Looks up the source of a capture. Failure is silent: return `None`.
pub trait SourceAttributor: Send + Sync {
    fn attribute(&self) -> Option<Attribution>;
}

/// Attributor that never attributes.
pub struct NoAttribution;

impl SourceAttributor for NoAttribution {
    fn attribute(&self) -> Option<Attribution> {
        None
    }
}

/// Attributes captures to the frontmost application and caches its icon.
pub struct AppAttributor {
    apps: Arc<dyn ActiveAppProvider>,
    icons: Arc<dyn AppIconProvider>,
    blobs: BlobStore,
}

impl AppAttributor {
    pub fn new(
        apps: Arc<dyn ActiveAppProvider>,
        icons: Arc<dyn AppIconProvider>,
        blobs: BlobStore,
    ) -> Self {
        Self { apps, icons, blobs }
    }
}

impl SourceAttributor for AppAttributor {
    fn attribute(&self) -> Option<Attribution> {
        let app = self.apps.get_active_app()?;
        let icon_path = self
            .blobs
            .cache_icon(&app.bundle_id, || self.icons.icon_png(&app));

        Some(Attribution {
            app_name: app.name,
            app_id: Some(app.bundle_id),
            icon_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipdeck_context::{AppInfo, NullProvider};
    use tempfile::tempdir;

    struct FixedApp;

    impl ActiveAppProvider for FixedApp {
        fn get_active_app(&self) -> Option<AppInfo> {
            Some(AppInfo::new("com.example.Notes").with_name("Notes"))
        }
    }

    impl AppIconProvider for FixedApp {
        fn icon_png(&self, _app: &AppInfo) -> Option<Vec<u8>> {
            Some(vec![1, 2, 3])
        }
    }

    #[test]
    fn test_attributes_frontmost_app_with_icon() {
        let dir = tempdir().unwrap();
        let blobs = BlobStore::in_dir(dir.path());
        let attributor = AppAttributor::new(Arc::new(FixedApp), Arc::new(FixedApp), blobs.clone());

        let attribution = attributor.attribute().unwrap();
        assert_eq!(attribution.app_name.as_deref(), Some("Notes"));
        assert_eq!(attribution.app_id.as_deref(), Some("com.example.Notes"));
        assert_eq!(attribution.icon_path, Some(blobs.icon_path("com.example.Notes")));
    }

    #[test]
    fn test_missing_icon_keeps_metadata() {
        let dir = tempdir().unwrap();
        let attributor = AppAttributor::new(
            Arc::new(FixedApp),
            Arc::new(NullProvider),
            BlobStore::in_dir(dir.path()),
        );

        let attribution = attributor.attribute().unwrap();
        assert_eq!(attribution.app_id.as_deref(), Some("com.example.Notes"));
        assert!(attribution.icon_path.is_none());
    }

    #[test]
    fn test_no_foreground_app() {
        let dir = tempdir().unwrap();
        let attributor = AppAttributor::new(
            Arc::new(NullProvider),
            Arc::new(NullProvider),
            BlobStore::in_dir(dir.path()),
        );
        assert!(attributor.attribute().is_none());
    }
}
