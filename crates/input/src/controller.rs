//! Input controller for the paste key-chord.

use crate::error::InputError;
use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use std::thread;
use std::time::Duration;

/// Pause between pressing the modifier and the letter key.
pub const MODIFIER_SETTLE_DELAY: Duration = Duration::from_millis(10);

/// Key combination that triggers "paste" on a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasteChord {
    pub modifier: Key,
    pub key: char,
}

impl PasteChord {
    /// Cmd+V on macOS, Ctrl+V elsewhere.
    pub fn platform_default() -> Self {
        #[cfg(target_os = "macos")]
        let modifier = Key::Meta;
        #[cfg(not(target_os = "macos"))]
        let modifier = Key::Control;

        Self { modifier, key: 'v' }
    }
}

impl Default for PasteChord {
    fn default() -> Self {
        Self::platform_default()
    }
}

/// Controller for keyboard emulation.
///
/// Key events go to whichever application holds focus when they are posted;
/// callers are responsible for activating the target first.
pub struct InputController {
    enigo: Enigo,
    chord: PasteChord,
}

impl InputController {
    /// Create a new input controller using the platform paste chord.
    ///
    /// # Errors
    ///
    /// Returns an error if accessibility permissions are not granted (macOS)
    /// or if the input system fails to initialize.
    pub fn new() -> Result<Self, InputError> {
        Self::with_chord(PasteChord::platform_default())
    }

    pub fn with_chord(chord: PasteChord) -> Result<Self, InputError> {
        if !crate::has_accessibility_access() {
            return Err(InputError::AccessibilityNotGranted);
        }

        let enigo =
            Enigo::new(&Settings::default()).map_err(|e| InputError::InitFailed(e.to_string()))?;

        Ok(Self { enigo, chord })
    }

    pub fn chord(&self) -> PasteChord {
        self.chord
    }

    /// Simulate a paste operation.
    ///
    /// Blocks the calling thread for [`MODIFIER_SETTLE_DELAY`].
    pub fn paste(&mut self) -> Result<(), InputError> {
        let PasteChord { modifier, key } = self.chord;

        self.enigo
            .key(modifier, Direction::Press)
            .map_err(|e| InputError::KeyFailed(e.to_string()))?;

        // Give the modifier time to register before the letter arrives
        thread::sleep(MODIFIER_SETTLE_DELAY);

        let clicked = self
            .enigo
            .key(Key::Unicode(key), Direction::Click)
            .map_err(|e| InputError::KeyFailed(e.to_string()));

        // Always release the modifier, even if the click failed
        self.enigo
            .key(modifier, Direction::Release)
            .map_err(|e| InputError::KeyFailed(e.to_string()))?;

        clicked?;
        tracing::debug!(?modifier, key = %key, "posted paste chord");
        Ok(())
    }
}

impl std::fmt::Debug for InputController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputController")
            .field("chord", &self.chord)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_chord() {
        let chord = PasteChord::platform_default();
        assert_eq!(chord.key, 'v');

        #[cfg(target_os = "macos")]
        assert_eq!(chord.modifier, Key::Meta);
        #[cfg(not(target_os = "macos"))]
        assert_eq!(chord.modifier, Key::Control);
    }

    #[test]
    fn test_controller_keeps_chord() {
        // Skip if no accessibility or no display (can't create controller)
        let controller = match InputController::new() {
            Ok(c) => c,
            Err(InputError::AccessibilityNotGranted) | Err(InputError::InitFailed(_)) => {
                println!("Skipping test - input system unavailable");
                return;
            }
            Err(e) => panic!("Unexpected error: {}", e),
        };

        assert_eq!(controller.chord(), PasteChord::platform_default());
    }
}
