//! Paste-back for clipdeck.
//!
//! Sequence for one paste: hide the panel, write the entry to the clipboard
//! with self-write suppression armed, then (when a target was recorded at
//! panel-open time) wait, re-activate the target, wait again and send the
//! platform paste chord. The delayed steps run on a spawned task so polling
//! and queries continue meanwhile. Concurrent pastes are not serialized.

mod coordinator;
mod error;
mod keys;

pub use coordinator::{
    PasteCoordinator, PasteMode, PasteOutcome, PasteTiming, DEFAULT_ACTIVATE_DELAY,
    DEFAULT_CHORD_DELAY,
};
pub use error::PasteError;
pub use keys::{InputKeyChord, KeyChordSender, NoPanel, PanelControl};
