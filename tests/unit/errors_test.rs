use scroll_restore::types::errors::*;

// === HistoryError Tests ===

#[test]
fn history_error_display_variants() {
    assert_eq!(
        HistoryError::Unsupported.to_string(),
        "History state mutation is not supported"
    );
    assert_eq!(
        HistoryError::Rejected("cross-origin URL".to_string()).to_string(),
        "History update rejected: cross-origin URL"
    );
}

#[test]
fn history_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(HistoryError::Unsupported);
    assert!(err.source().is_none());
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("disk full".to_string()).to_string(),
        "Settings I/O error: disk full"
    );
    assert_eq!(
        SettingsError::SerializationError("trailing comma".to_string()).to_string(),
        "Settings serialization error: trailing comma"
    );
    assert_eq!(
        SettingsError::InvalidKey("foo.bar".to_string()).to_string(),
        "Invalid settings key: foo.bar"
    );
    assert_eq!(
        SettingsError::InvalidValue("expected u64".to_string()).to_string(),
        "Invalid settings value: expected u64"
    );
}

// === EventLoopError Tests ===

#[test]
fn event_loop_error_display() {
    assert_eq!(
        EventLoopError::TimerStepLimit { limit: 10 }.to_string(),
        "Timer step limit exceeded: ran more than 10 timers"
    );
}

#[test]
fn errors_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HistoryError>();
    assert_send_sync::<SettingsError>();
    assert_send_sync::<EventLoopError>();
}
