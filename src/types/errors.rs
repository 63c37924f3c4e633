use thiserror::Error;

// === HistoryError ===

/// Errors reported by a host's history entry points.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The environment does not support mutating history state.
    #[error("History state mutation is not supported")]
    Unsupported,
    /// The host refused the state or URL.
    #[error("History update rejected: {0}")]
    Rejected(String),
}

// === SettingsError ===

/// Errors related to restoration settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read or write the settings file.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key does not exist.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided value is invalid for the given key.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

// === EventLoopError ===

/// Errors raised by the headless event loop.
#[derive(Debug, Error)]
pub enum EventLoopError {
    /// More timers ran in one step than the configured limit allows.
    #[error("Timer step limit exceeded: ran more than {limit} timers")]
    TimerStepLimit { limit: usize },
}
