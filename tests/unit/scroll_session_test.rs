//! Unit tests for the scroll session wiring.
//!
//! These tests exercise a whole page lifecycle through `ScrollSession`:
//! navigating away with the wrapped history, coming back, and letting the
//! headless event loop run restoration.

use std::time::Duration;

use scroll_restore::app::ScrollSession;
use scroll_restore::managers::session_history::SessionHistoryTrait;
use scroll_restore::platform::headless::HeadlessPage;
use scroll_restore::platform::{HistoryApi, TimerApi, ViewportApi};
use scroll_restore::services::restoration_poller::RestorationPhase;
use scroll_restore::types::errors::EventLoopError;
use scroll_restore::types::scroll::ScrollPosition;
use scroll_restore::types::settings::RestorationSettings;
use serde_json::{json, Value};

fn session_with(settings: &RestorationSettings) -> ScrollSession<HeadlessPage> {
    let page = HeadlessPage::new("/list", 1000.0, 800.0).with_content_size(985.0, 5000.0);
    ScrollSession::install(page, settings)
}

fn session() -> ScrollSession<HeadlessPage> {
    session_with(&RestorationSettings::default())
}

/// Scrolls the list to `y`, opens an item and scrolls its page to the top.
fn open_item(session: &mut ScrollSession<HeadlessPage>, y: f64) {
    session.host_mut().user_scroll(0.0, y);
    session
        .history()
        .push_state(json!({ "item": 1 }), "Item", Some("/item/1"))
        .unwrap();
    session.host_mut().user_scroll(0.0, 0.0);
}

#[test]
fn test_back_restores_list_position() {
    let mut session = session();
    open_item(&mut session, 2000.0);

    assert!(session.back());
    assert_eq!(session.host().current_entry().url, "/list");
    assert_eq!(session.run_until_idle().unwrap(), 1);

    assert_eq!(session.host().scroll_position(), ScrollPosition::new(0.0, 2000.0));
    assert!(matches!(
        session.phase(),
        RestorationPhase::Scrolled { attempts: 1, forced: false, .. }
    ));
}

#[test]
fn test_forward_to_entry_without_offsets() {
    let mut session = session();
    open_item(&mut session, 2000.0);
    session.back();
    session.run_until_idle().unwrap();

    assert!(session.forward());
    assert_eq!(session.host().current_entry().url, "/item/1");
    assert_eq!(session.restoration().pending_timer(), None);
    assert_eq!(session.run_until_idle().unwrap(), 0);
}

#[test]
fn test_back_does_not_capture_item_position() {
    let mut session = session();
    open_item(&mut session, 2000.0);
    session.host_mut().user_scroll(0.0, 900.0);

    session.back();
    session.run_until_idle().unwrap();
    session.forward();
    session.run_until_idle().unwrap();

    // Item position was never captured: going back happens without a push.
    assert_eq!(session.host().scroll_requests().len(), 1);
}

#[test]
fn test_traversal_past_ends_is_ignored() {
    let mut session = session();
    assert!(!session.back());
    assert!(!session.forward());
    assert!(!session.go(3));
    assert_eq!(session.phase(), RestorationPhase::Idle);
}

#[test]
fn test_go_multiple_entries() {
    let mut session = session();
    open_item(&mut session, 1500.0);
    session
        .history()
        .push_state(json!({ "item": 2 }), "Item 2", Some("/item/2"))
        .unwrap();

    assert!(session.go(-2));
    assert_eq!(session.host().current_entry().url, "/list");
    session.run_until_idle().unwrap();
    assert_eq!(session.host().scroll_position(), ScrollPosition::new(0.0, 1500.0));
}

#[test]
fn test_advance_time_runs_due_attempts_only() {
    let mut session = session();
    open_item(&mut session, 4000.0);
    session.back();
    session.host_mut().set_content_size(985.0, 785.0);

    assert_eq!(session.advance_time(Duration::from_millis(120)).unwrap(), 3);
    assert_eq!(session.host().now(), Duration::from_millis(120));
    assert!(matches!(
        session.phase(),
        RestorationPhase::Rescheduled { attempts: 3, .. }
    ));

    session.host_mut().set_content_size(985.0, 5000.0);
    assert_eq!(session.advance_time(Duration::from_millis(30)).unwrap(), 1);
    assert_eq!(session.host().scroll_position(), ScrollPosition::new(0.0, 4000.0));
    assert_eq!(session.host().now(), Duration::from_millis(150));
}

#[test]
fn test_deadline_through_session() {
    let mut session = session();
    open_item(&mut session, 4000.0);
    session.back();
    session.host_mut().set_content_size(985.0, 785.0);

    assert_eq!(session.run_until_idle().unwrap(), 62);
    assert_eq!(session.host().now(), Duration::from_millis(3050));
    assert!(matches!(
        session.phase(),
        RestorationPhase::Scrolled { forced: true, .. }
    ));
}

#[test]
fn test_timing_from_settings() {
    let settings = RestorationSettings {
        enabled: true,
        timeout_ms: 200,
        retry_interval_ms: 100,
    };
    let mut session = session_with(&settings);
    open_item(&mut session, 4000.0);
    session.back();
    session.host_mut().set_content_size(985.0, 785.0);

    assert_eq!(session.run_until_idle().unwrap(), 4);
    assert_eq!(session.host().now(), Duration::from_millis(300));
}

#[test]
fn test_step_limit_stops_runaway_loop() {
    let mut session = session();
    open_item(&mut session, 4000.0);
    session.back();
    session.host_mut().set_content_size(985.0, 785.0);
    session.host_mut().set_timer_step_limit(10);

    let result = session.run_until_idle();
    assert!(matches!(
        result,
        Err(EventLoopError::TimerStepLimit { limit: 10 })
    ));
}

#[test]
fn test_cancel_through_session() {
    let mut session = session();
    open_item(&mut session, 4000.0);
    session.back();

    session.cancel();
    assert_eq!(session.phase(), RestorationPhase::Cancelled);
    assert_eq!(session.run_until_idle().unwrap(), 0);
    assert!(session.host().scroll_requests().is_empty());
}

#[test]
fn test_foreign_timers_are_not_restoration() {
    let mut session = session();
    let foreign = session.host_mut().set_timeout(Duration::ZERO);
    assert!(!session.on_timer(foreign));
}

#[test]
fn test_disabled_settings_install_nothing() {
    let settings = RestorationSettings {
        enabled: false,
        ..RestorationSettings::default()
    };
    let mut session = session_with(&settings);
    open_item(&mut session, 2000.0);

    let list = &session.host().session_history().entries()[0];
    assert_eq!(list.state, Value::Null);

    session
        .host_mut()
        .replace_state(json!({ "__scrollX": 0, "__scrollY": 100 }), "", None)
        .unwrap();
    assert!(!session.on_pop_state());
    assert!(session.host().pending_timers().is_empty());
}

#[test]
fn test_into_host_returns_page() {
    let mut session = session();
    open_item(&mut session, 300.0);
    let page = session.into_host();
    assert_eq!(page.session_history().len(), 2);
    assert_eq!(page.current_entry().url, "/item/1");
}

#[test]
fn test_advance_time_saturates_at_far_future() {
    let mut session = session();
    open_item(&mut session, 4000.0);
    session.back();
    session.host_mut().set_content_size(985.0, 785.0);

    assert_eq!(session.advance_time(Duration::from_millis(10)).unwrap(), 1);
    assert_eq!(session.advance_time(Duration::MAX).unwrap(), 61);

    assert_eq!(session.host().now(), Duration::MAX);
    assert!(matches!(
        session.phase(),
        RestorationPhase::Scrolled { forced: true, .. }
    ));
}

#[test]
fn test_navigation_after_far_future_clock() {
    let mut session = session();
    open_item(&mut session, 1000.0);
    session.advance_time(Duration::from_millis(10)).unwrap();
    session.advance_time(Duration::MAX).unwrap();

    assert!(session.back());
    assert_eq!(session.run_until_idle().unwrap(), 1);
    assert_eq!(session.host().scroll_position(), ScrollPosition::new(0.0, 1000.0));
}
