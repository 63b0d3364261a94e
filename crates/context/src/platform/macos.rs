//! macOS implementation of the application providers.

use crate::provider::{ActiveAppProvider, AppActivator, AppIconProvider};
use crate::state::AppInfo;
use std::ffi::CString;
use std::path::PathBuf;

// Native Cocoa imports for efficient frontmost app detection
use objc::runtime::{Class, Object, BOOL, NO};
use objc::{msg_send, sel, sel_impl};

/// `NSApplicationActivateIgnoringOtherApps`
const ACTIVATE_IGNORING_OTHER_APPS: usize = 1 << 1;

/// `NSBitmapImageFileTypePNG`
const BITMAP_FILE_TYPE_PNG: usize = 4;

/// macOS implementation using NSWorkspace and NSRunningApplication.
///
/// All queries go through native Cocoa APIs without subprocess overhead.
#[derive(Debug, Default)]
pub struct MacOSProvider;

impl MacOSProvider {
    pub fn new() -> Self {
        Self
    }
}

impl ActiveAppProvider for MacOSProvider {
    fn get_active_app(&self) -> Option<AppInfo> {
        get_frontmost_app()
    }
}

impl AppActivator for MacOSProvider {
    fn activate(&self, app: &AppInfo) -> bool {
        let activated = activate_bundle(&app.bundle_id);
        if !activated {
            tracing::debug!(bundle_id = %app.bundle_id, "application could not be activated");
        }
        activated
    }
}

impl AppIconProvider for MacOSProvider {
    fn icon_png(&self, app: &AppInfo) -> Option<Vec<u8>> {
        let path = app.bundle_path.as_ref()?;
        icon_png_for_path(path.to_str()?)
    }
}

/// Get the frontmost application using native Cocoa APIs.
///
/// Uses NSWorkspace.sharedWorkspace.frontmostApplication.
fn get_frontmost_app() -> Option<AppInfo> {
    unsafe {
        let workspace_class = Class::get("NSWorkspace")?;

        let shared_workspace: *mut Object = msg_send![workspace_class, sharedWorkspace];
        if shared_workspace.is_null() {
            return None;
        }

        let frontmost_app: *mut Object = msg_send![shared_workspace, frontmostApplication];
        if frontmost_app.is_null() {
            return None;
        }

        let bundle_id_ns: *mut Object = msg_send![frontmost_app, bundleIdentifier];
        let bundle_id = nsstring_to_string(bundle_id_ns)?;

        if bundle_id.is_empty() {
            return None;
        }

        let name_ns: *mut Object = msg_send![frontmost_app, localizedName];
        let name = nsstring_to_string(name_ns);

        let bundle_url: *mut Object = msg_send![frontmost_app, bundleURL];
        let bundle_path = if bundle_url.is_null() {
            None
        } else {
            let path_ns: *mut Object = msg_send![bundle_url, path];
            nsstring_to_string(path_ns).map(PathBuf::from)
        };

        Some(AppInfo {
            bundle_id,
            name,
            bundle_path,
        })
    }
}

/// Activate the first running instance of `bundle_id`.
fn activate_bundle(bundle_id: &str) -> bool {
    unsafe {
        let Some(running_class) = Class::get("NSRunningApplication") else {
            return false;
        };
        let Some(bundle_ns) = string_to_nsstring(bundle_id) else {
            return false;
        };

        let apps: *mut Object =
            msg_send![running_class, runningApplicationsWithBundleIdentifier: bundle_ns];
        if apps.is_null() {
            return false;
        }

        let app: *mut Object = msg_send![apps, firstObject];
        if app.is_null() {
            return false;
        }

        let result: BOOL = msg_send![app, activateWithOptions: ACTIVATE_IGNORING_OTHER_APPS];
        result != NO
    }
}

/// Render the Finder icon of the bundle at `path` as PNG.
fn icon_png_for_path(path: &str) -> Option<Vec<u8>> {
    unsafe {
        let workspace_class = Class::get("NSWorkspace")?;
        let shared_workspace: *mut Object = msg_send![workspace_class, sharedWorkspace];
        if shared_workspace.is_null() {
            return None;
        }

        let path_ns = string_to_nsstring(path)?;
        let image: *mut Object = msg_send![shared_workspace, iconForFile: path_ns];
        if image.is_null() {
            return None;
        }

        let tiff: *mut Object = msg_send![image, TIFFRepresentation];
        if tiff.is_null() {
            return None;
        }

        let rep_class = Class::get("NSBitmapImageRep")?;
        let rep: *mut Object = msg_send![rep_class, imageRepWithData: tiff];
        if rep.is_null() {
            return None;
        }

        let dict_class = Class::get("NSDictionary")?;
        let properties: *mut Object = msg_send![dict_class, dictionary];
        let png: *mut Object =
            msg_send![rep, representationUsingType: BITMAP_FILE_TYPE_PNG properties: properties];
        nsdata_to_vec(png)
    }
}

/// Convert NSString to Rust String.
unsafe fn nsstring_to_string(nsstring: *mut Object) -> Option<String> {
    if nsstring.is_null() {
        return None;
    }

    let c_str: *const std::os::raw::c_char = msg_send![nsstring, UTF8String];
    if c_str.is_null() {
        return None;
    }

    let rust_str = std::ffi::CStr::from_ptr(c_str).to_str().ok()?;
    Some(rust_str.to_string())
}

/// Create an autoreleased NSString from a Rust string.
unsafe fn string_to_nsstring(s: &str) -> Option<*mut Object> {
    let c_string = CString::new(s).ok()?;
    let string_class = Class::get("NSString")?;
    let ns: *mut Object = msg_send![string_class, stringWithUTF8String: c_string.as_ptr()];
    (!ns.is_null()).then_some(ns)
}

/// Copy the contents of an NSData object.
unsafe fn nsdata_to_vec(data: *mut Object) -> Option<Vec<u8>> {
    if data.is_null() {
        return None;
    }

    let len: usize = msg_send![data, length];
    let bytes: *const u8 = msg_send![data, bytes];
    if bytes.is_null() || len == 0 {
        return None;
    }

    Some(std::slice::from_raw_parts(bytes, len).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_frontmost_app() {
        // Smoke test only: the result depends on what is focused during the run
        let app = get_frontmost_app();
        println!("Frontmost app: {:?}", app);
    }

    #[test]
    fn test_activate_unknown_bundle_fails() {
        let provider = MacOSProvider::new();
        assert!(!provider.activate(&AppInfo::new("invalid.clipdeck.does-not-exist")));
    }
}
