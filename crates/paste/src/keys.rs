//! Platform seams used by the coordinator.

use crate::error::PasteError;
use clipdeck_input::InputController;

/// Synthesizes the platform paste shortcut into the focused application.
///
/// Called from a blocking thread.
pub trait KeyChordSender: Send + Sync {
    fn send_paste_chord(&self) -> Result<(), PasteError>;
}

/// Hides the presentation panel before a paste-back.
pub trait PanelControl: Send + Sync {
    fn hide(&self);
}

/// Panel control for headless use.
#[derive(Debug, Default)]
pub struct NoPanel;

impl PanelControl for NoPanel {
    fn hide(&self) {}
}

/// Key-chord sender backed by [`InputController`].
///
/// A controller is created per chord so a permission granted while running
/// takes effect without a restart.
#[derive(Debug, Default)]
pub struct InputKeyChord;

impl InputKeyChord {
    pub fn new() -> Self {
        Self
    }
}

impl KeyChordSender for InputKeyChord {
    fn send_paste_chord(&self) -> Result<(), PasteError> {
        let mut controller = InputController::new()?;
        controller.paste()?;
        Ok(())
    }
}
