//! Foreground application state.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Information about a running application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    /// Bundle ID (e.g., "com.apple.Safari")
    pub bundle_id: String,

    /// Display name (e.g., "Safari")
    pub name: Option<String>,

    /// Location of the application bundle, used for icon lookup
    #[serde(default)]
    pub bundle_path: Option<PathBuf>,
}

impl AppInfo {
    pub fn new(bundle_id: impl Into<String>) -> Self {
        Self {
            bundle_id: bundle_id.into(),
            name: None,
            bundle_path: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name for display, falling back to the bundle ID.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.bundle_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_bundle_id() {
        let app = AppInfo::new("org.example.Editor");
        assert_eq!(app.display_name(), "org.example.Editor");

        let app = app.with_name("Editor");
        assert_eq!(app.display_name(), "Editor");
    }
}
