//! NSPasteboard-backed clipboard.
//!
//! The change counter and URL types come straight from the general
//! pasteboard; text and bitmap transfer go through arboard.

use super::{get_image, get_text, set_image, set_text};
use crate::error::Result;
use crate::source::{ClipboardSource, ClipboardWriter};
use clipdeck_history::CapturedImage;
use std::ffi::{CStr, CString};

use objc::runtime::{Class, Object};
use objc::{msg_send, sel, sel_impl};

/// Pasteboard types holding a URL reference, most specific first.
const URL_TYPES: &[&str] = &["public.file-url", "public.url"];

#[derive(Debug, Default)]
pub struct MacPasteboard;

impl MacPasteboard {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardSource for MacPasteboard {
    fn change_count(&self) -> u64 {
        unsafe {
            let Some(pasteboard) = general_pasteboard() else {
                return 0;
            };
            let count: isize = msg_send![pasteboard, changeCount];
            count.max(0) as u64
        }
    }

    fn read_image(&self) -> Option<CapturedImage> {
        get_image()
    }

    fn read_url(&self) -> Option<String> {
        URL_TYPES
            .iter()
            .find_map(|ty| unsafe { string_for_type(ty) })
            .filter(|s| !s.is_empty())
    }

    fn read_text(&self) -> Option<String> {
        get_text()
    }
}

impl ClipboardWriter for MacPasteboard {
    fn write_text(&self, text: &str) -> Result<u64> {
        set_text(text)?;
        Ok(self.change_count())
    }

    fn write_image(&self, image: &CapturedImage) -> Result<u64> {
        set_image(image)?;
        Ok(self.change_count())
    }
}

unsafe fn general_pasteboard() -> Option<*mut Object> {
    let class = Class::get("NSPasteboard")?;
    let pasteboard: *mut Object = msg_send![class, generalPasteboard];
    (!pasteboard.is_null()).then_some(pasteboard)
}

unsafe fn string_for_type(ty: &str) -> Option<String> {
    let pasteboard = general_pasteboard()?;
    let c_type = CString::new(ty).ok()?;
    let string_class = Class::get("NSString")?;
    let ns_type: *mut Object = msg_send![string_class, stringWithUTF8String: c_type.as_ptr()];
    if ns_type.is_null() {
        return None;
    }

    let value: *mut Object = msg_send![pasteboard, stringForType: ns_type];
    if value.is_null() {
        return None;
    }

    let c_str: *const std::os::raw::c_char = msg_send![value, UTF8String];
    if c_str.is_null() {
        return None;
    }
    CStr::from_ptr(c_str).to_str().ok().map(str::to_string)
}
