//! Unit tests for the SessionHistory public API.
//!
//! These tests exercise pushing, replacing and traversing entries through the
//! `SessionHistoryTrait` and `HistoryApi` interfaces.

use scroll_restore::managers::session_history::{SessionHistory, SessionHistoryTrait};
use scroll_restore::platform::HistoryApi;
use serde_json::{json, Value};

/// Helper: a history with entries /a, /b, /c and /c current.
fn three_entries() -> SessionHistory {
    let mut history = SessionHistory::new("/a");
    history.push_state(json!({ "n": 1 }), "B", Some("/b")).unwrap();
    history.push_state(json!({ "n": 2 }), "C", Some("/c")).unwrap();
    history
}

#[test]
fn test_push_makes_new_entry_current() {
    let history = three_entries();
    assert_eq!(history.len(), 3);
    assert_eq!(history.current_index(), 2);
    assert_eq!(history.current().url, "/c");
    assert_eq!(history.current().title, "C");
    assert_eq!(history.state(), json!({ "n": 2 }));
}

#[test]
fn test_push_without_url_keeps_current_url() {
    let mut history = SessionHistory::new("/list?page=1");
    history.push_state(json!({ "filter": "new" }), "", None).unwrap();
    assert_eq!(history.current().url, "/list?page=1");
    assert_eq!(history.len(), 2);
}

#[test]
fn test_back_and_forward_expose_entry_state() {
    let mut history = three_entries();

    let back = history.back().cloned().unwrap();
    assert_eq!(back.url, "/b");
    assert_eq!(back.state, json!({ "n": 1 }));

    let back = history.back().cloned().unwrap();
    assert_eq!(back.url, "/a");
    assert_eq!(back.state, Value::Null);
    assert!(history.back().is_none(), "Cannot go back past the first entry");

    let forward = history.go(2).cloned().unwrap();
    assert_eq!(forward.url, "/c");
    assert!(history.forward().is_none(), "Cannot go forward past the last entry");
}

#[test]
fn test_replace_keeps_entry_identity() {
    let mut history = three_entries();
    let id = history.current().id.clone();

    history
        .replace_state(json!({ "n": 99 }), "C'", Some("/c?x=1"))
        .unwrap();

    assert_eq!(history.len(), 3);
    assert_eq!(history.current().id, id);
    assert_eq!(history.current().url, "/c?x=1");
    assert_eq!(history.state(), json!({ "n": 99 }));
}

#[test]
fn test_replace_without_url_keeps_url() {
    let mut history = three_entries();
    history.back();
    history.replace_state(Value::Null, "", None).unwrap();
    assert_eq!(history.current().url, "/b");
    assert_eq!(history.state(), Value::Null);
}

#[test]
fn test_entry_ids_are_unique() {
    let history = three_entries();
    let entries = history.entries();
    assert_ne!(entries[0].id, entries[1].id);
    assert_ne!(entries[1].id, entries[2].id);
    assert_ne!(entries[0].id, entries[2].id);
}
