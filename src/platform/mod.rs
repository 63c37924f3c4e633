// Platform abstraction
// Host capability traits a page environment implements, a headless in-memory
// host, and the per-OS configuration directory.

use std::path::PathBuf;

pub mod headless;
pub mod host;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

pub use host::{
    DocumentMetrics, HistoryApi, PageHost, ProbeDom, ProbeStyle, TimerApi, TimerId, ViewportApi,
};

/// Returns the platform-specific configuration directory.
///
/// - **Linux**: `~/.config/scroll-restore` (or `$XDG_CONFIG_HOME/scroll-restore`)
/// - **macOS**: `~/Library/Application Support/ScrollRestore`
/// - **Windows**: `%APPDATA%/ScrollRestore`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}
