//! Provider traits for foreground application queries.
//!
//! These traits abstract platform-specific implementations,
//! allowing the history, watcher and paste logic to stay testable.

use crate::state::AppInfo;

/// Provider for detecting the currently focused application.
pub trait ActiveAppProvider: Send + Sync {
    /// Get the currently focused application.
    fn get_active_app(&self) -> Option<AppInfo>;
}

/// Brings an application back to the front.
pub trait AppActivator: Send + Sync {
    /// Activate `app`, ignoring other applications.
    ///
    /// Returns `false` if the application is no longer running
    /// or could not be activated.
    fn activate(&self, app: &AppInfo) -> bool;
}

/// Provider for application icons.
pub trait AppIconProvider: Send + Sync {
    /// PNG-encoded icon of `app`, if one can be produced.
    fn icon_png(&self, app: &AppInfo) -> Option<Vec<u8>>;
}

/// Null implementation for testing or unsupported platforms.
pub struct NullProvider;

impl NullProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ActiveAppProvider for NullProvider {
    fn get_active_app(&self) -> Option<AppInfo> {
        None
    }
}

impl AppActivator for NullProvider {
    fn activate(&self, _app: &AppInfo) -> bool {
        false
    }
}

impl AppIconProvider for NullProvider {
    fn icon_png(&self, _app: &AppInfo) -> Option<Vec<u8>> {
        None
    }
}
