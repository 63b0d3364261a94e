//! Error types for input emulation.

use thiserror::Error;

/// Errors that can occur while synthesizing the paste shortcut.
#[derive(Debug, Error)]
pub enum InputError {
    /// Accessibility permission not granted (macOS).
    #[error("accessibility permission not granted - open System Settings > Privacy & Security > Accessibility")]
    AccessibilityNotGranted,

    /// Failed to initialize the input controller.
    #[error("failed to initialize input controller: {0}")]
    InitFailed(String),

    /// Failed to simulate key press.
    #[error("failed to simulate key: {0}")]
    KeyFailed(String),
}
