//! scroll-restore — scroll position restoration across back/forward navigation.
//!
//! Captures the scroll offsets of a page into its session history state
//! whenever the page pushes or replaces state, and restores them on return
//! navigation once the document has grown large enough to scroll there.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;
