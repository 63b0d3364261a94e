//! Content fingerprints.
//!
//! `id = family prefix + hex(SHA-256(normalized payload))`. Text is trimmed
//! before hashing; bitmaps are re-encoded as PNG so identical pixels always
//! hash the same regardless of the representation they arrived in.

use crate::error::{HistoryError, Result};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};
use sha2::{Digest, Sha256};

/// Prefix for text-like entries (text, link, code, file).
pub const TEXT_ID_PREFIX: &str = "T:";

/// Prefix for image entries.
pub const IMAGE_ID_PREFIX: &str = "I:";

/// Normalize captured text before fingerprinting and storage.
pub fn normalize_text(raw: &str) -> &str {
    raw.trim()
}

/// Fingerprint of already-normalized text.
pub fn text_fingerprint(normalized: &str) -> String {
    format!("{TEXT_ID_PREFIX}{}", sha256_hex(normalized.as_bytes()))
}

/// Fingerprint of a canonical PNG encoding.
pub fn image_fingerprint(png: &[u8]) -> String {
    format!("{IMAGE_ID_PREFIX}{}", sha256_hex(png))
}

fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// A bitmap read from the clipboard: 8-bit RGBA, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

impl CapturedImage {
    pub fn new(width: usize, height: usize, rgba: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba,
        }
    }

    /// Canonical PNG encoding used for hashing and blob storage.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let expected = self
            .width
            .checked_mul(self.height)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| {
                HistoryError::InvalidImage(format!(
                    "{}x{} bitmap dimensions overflow",
                    self.width, self.height
                ))
            })?;
        if self.width == 0 || self.height == 0 || self.rgba.len() != expected {
            return Err(HistoryError::InvalidImage(format!(
                "{}x{} bitmap with {} bytes (expected {})",
                self.width,
                self.height,
                self.rgba.len(),
                expected
            )));
        }

        let width = u32::try_from(self.width)
            .map_err(|_| HistoryError::InvalidImage(format!("width {} too large", self.width)))?;
        let height = u32::try_from(self.height)
            .map_err(|_| HistoryError::InvalidImage(format!("height {} too large", self.height)))?;

        let mut png = Vec::new();
        PngEncoder::new(&mut png).write_image(&self.rgba, width, height, ExtendedColorType::Rgba8)?;
        Ok(png)
    }

    /// Decode a PNG blob back into a bitmap.
    pub fn from_png(png: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory_with_format(png, ImageFormat::Png)?.to_rgba8();
        let (width, height) = decoded.dimensions();
        Ok(Self::new(width as usize, height as usize, decoded.into_raw()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard() -> CapturedImage {
        let mut rgba = Vec::new();
        for i in 0..4 {
            let v = if i % 2 == 0 { 0 } else { 255 };
            rgba.extend_from_slice(&[v, v, v, 255]);
        }
        CapturedImage::new(2, 2, rgba)
    }

    #[test]
    fn test_text_fingerprint_is_whitespace_insensitive() {
        let a = text_fingerprint(normalize_text(" hello "));
        let b = text_fingerprint(normalize_text("hello"));
        assert_eq!(a, b);
        assert!(a.starts_with(TEXT_ID_PREFIX));
        assert_eq!(a.len(), TEXT_ID_PREFIX.len() + 64);
    }

    #[test]
    fn test_families_never_collide() {
        let png = checkerboard().to_png().unwrap();
        let as_image = image_fingerprint(&png);
        let as_text = text_fingerprint(&String::from_utf8_lossy(&png));
        assert!(as_image.starts_with(IMAGE_ID_PREFIX));
        assert_ne!(as_image, as_text);
    }

    #[test]
    fn test_png_encoding_is_deterministic() {
        let first = checkerboard().to_png().unwrap();
        let second = checkerboard().to_png().unwrap();
        assert_eq!(image_fingerprint(&first), image_fingerprint(&second));
    }

    #[test]
    fn test_png_decodes_to_same_pixels() {
        let original = checkerboard();
        let decoded = CapturedImage::from_png(&original.to_png().unwrap()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_mismatched_buffer_rejected() {
        let broken = CapturedImage::new(3, 3, vec![0; 8]);
        assert!(matches!(broken.to_png(), Err(HistoryError::InvalidImage(_))));
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        let absurd = CapturedImage::new(usize::MAX, 2, Vec::new());
        assert!(matches!(absurd.to_png(), Err(HistoryError::InvalidImage(_))));
    }
}
