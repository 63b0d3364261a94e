//! Synthetic paste shortcut for clipdeck.
//!
//! Sends the platform paste key-chord (Cmd+V on macOS, Ctrl+V elsewhere)
//! to whichever application currently holds keyboard focus.
//!
//! # Example
//!
//! ```ignore
//! use clipdeck_input::InputController;
//!
//! let mut controller = InputController::new()?;
//! controller.paste()?;
//! ```

mod controller;
mod error;

#[cfg(target_os = "macos")]
mod macos;

pub use controller::{InputController, PasteChord, MODIFIER_SETTLE_DELAY};
pub use error::InputError;

/// Check if the application may post synthetic keyboard events.
///
/// On macOS, event posting requires Accessibility permission.
/// On other platforms, always returns `true`.
pub fn has_accessibility_access() -> bool {
    #[cfg(target_os = "macos")]
    {
        macos::has_accessibility_access()
    }
    #[cfg(not(target_os = "macos"))]
    {
        true
    }
}
