use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default time to wait for the document to grow before scrolling anyway.
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;
/// Default delay between two restoration attempts.
pub const DEFAULT_RETRY_INTERVAL_MS: u64 = 50;

/// Scroll restoration settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RestorationSettings {
    /// When false the history entry points are left untouched and return
    /// navigation never scrolls.
    pub enabled: bool,
    pub timeout_ms: u64,
    pub retry_interval_ms: u64,
}

impl Default for RestorationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retry_interval_ms: DEFAULT_RETRY_INTERVAL_MS,
        }
    }
}

impl RestorationSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }
}
