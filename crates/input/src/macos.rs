//! macOS accessibility check for synthetic key events.

#[link(name = "ApplicationServices", kind = "framework")]
extern "C" {
    fn AXIsProcessTrusted() -> bool;
}

/// Whether this process is trusted for accessibility features.
///
/// Posting key events into other applications silently fails without it.
/// Granting the permission is left to the user; nothing is prompted here.
pub fn has_accessibility_access() -> bool {
    let trusted = unsafe { AXIsProcessTrusted() };
    if !trusted {
        tracing::debug!("process is not trusted for accessibility");
    }
    trusted
}
