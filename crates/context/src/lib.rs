//! Foreground application awareness for clipdeck.
//!
//! This crate answers three questions about the desktop:
//! - Which application currently holds input focus (attribution, ignore list)
//! - How to bring a previously focused application back to the front (paste-back)
//! - What that application's icon looks like (cached next to the history)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                             │
//! │  state.rs    - AppInfo                                       │
//! │  filter.rs   - credential-manager ignore list (pure)         │
//! │  provider.rs - Traits for platform queries                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Infrastructure Layer                        │
//! │  platform/macos.rs - NSWorkspace / NSRunningApplication      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use clipdeck_context::{platform::PlatformProvider, ActiveAppProvider};
//!
//! let provider = PlatformProvider::new();
//! if let Some(app) = provider.get_active_app() {
//!     println!("focused: {}", app.bundle_id);
//! }
//! ```

mod filter;
mod provider;
mod state;

pub mod platform;

pub use filter::{is_ignored_app, DEFAULT_IGNORED_APPS};
pub use provider::{ActiveAppProvider, AppActivator, AppIconProvider, NullProvider};
pub use state::AppInfo;
