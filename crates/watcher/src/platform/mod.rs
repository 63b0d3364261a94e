//! Host clipboard implementations.

mod generic;

#[cfg(target_os = "macos")]
mod macos;

pub use generic::ArboardClipboard;

#[cfg(target_os = "macos")]
pub use macos::MacPasteboard;

/// Clipboard backend for the current platform.
#[cfg(target_os = "macos")]
pub type PlatformClipboard = MacPasteboard;

#[cfg(not(target_os = "macos"))]
pub type PlatformClipboard = ArboardClipboard;

use crate::error::{Result, WatcherError};
use arboard::{Clipboard, ImageData};
use clipdeck_history::CapturedImage;
use std::borrow::Cow;

fn open() -> Result<Clipboard> {
    Clipboard::new().map_err(|e| WatcherError::Unavailable(e.to_string()))
}

fn get_text() -> Option<String> {
    open()
        .ok()
        .and_then(|mut cb| cb.get_text().ok())
        .filter(|s| !s.is_empty())
}

fn get_image() -> Option<CapturedImage> {
    let mut cb = open().ok()?;
    let image = cb.get_image().ok()?;
    Some(CapturedImage::new(
        image.width,
        image.height,
        image.bytes.into_owned(),
    ))
}

fn set_text(text: &str) -> Result<()> {
    open()?
        .set_text(text)
        .map_err(|e| WatcherError::WriteFailed(e.to_string()))
}

fn set_image(image: &CapturedImage) -> Result<()> {
    let data = ImageData {
        width: image.width,
        height: image.height,
        bytes: Cow::Borrowed(&image.rgba),
    };
    open()?
        .set_image(data)
        .map_err(|e| WatcherError::WriteFailed(e.to_string()))
}
