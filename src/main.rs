//! scroll-restore demo.
//!
//! Drives a headless page through the situations scroll restoration handles:
//! capture on push, immediate restoration, restoration that waits for late
//! content, the deadline fallback and cancellation.
//!
//! Set `RUST_LOG=scroll_restore=debug` to watch the restoration events.

use std::time::Duration;

use scroll_restore::app::ScrollSession;
use scroll_restore::managers::session_history::SessionHistoryTrait;
use scroll_restore::platform::headless::HeadlessPage;
use scroll_restore::platform::{HistoryApi, ViewportApi};
use scroll_restore::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use scroll_restore::types::settings::RestorationSettings;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!();
    println!("scroll-restore v{} — Demo Mode", env!("CARGO_PKG_VERSION"));
    println!();

    let settings = demo_settings();
    demo_capture(&settings);
    demo_immediate_restore(&settings);
    demo_late_content(&settings);
    demo_deadline(&settings);
    demo_cancellation(&settings);

    println!("═══════════════════════════════════════════════════════════════");
    println!("  All scenarios completed.");
    println!("═══════════════════════════════════════════════════════════════");
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn demo_settings() -> RestorationSettings {
    section("Settings");
    // Demo-local settings file, always reset to defaults.
    let path = std::env::temp_dir()
        .join("scroll-restore-demo")
        .join("settings.json");
    let mut engine = SettingsEngine::new(Some(path.to_string_lossy().to_string()));
    let settings = match engine.reset() {
        Ok(()) => engine.get_settings().clone(),
        Err(e) => {
            println!("  Could not write {}: {}", engine.get_config_path(), e);
            RestorationSettings::default()
        }
    };
    println!("  Config path: {}", engine.get_config_path());
    println!("  Enabled: {}", settings.enabled);
    println!("  Timeout: {} ms", settings.timeout_ms);
    println!("  Retry interval: {} ms", settings.retry_interval_ms);
    println!();
    settings
}

/// A long list page: 1280x720 viewport, 6000px of content.
fn list_page(settings: &RestorationSettings) -> ScrollSession<HeadlessPage> {
    let page = HeadlessPage::new("https://example.com/list", 1280.0, 720.0)
        .with_content_size(1265.0, 6000.0);
    ScrollSession::install(page, settings)
}

/// Scrolls the list, opens an item, and returns to the list.
fn open_item_and_return(session: &mut ScrollSession<HeadlessPage>, y: f64) {
    session.host_mut().user_scroll(0.0, y);
    session
        .history()
        .push_state(serde_json::json!({ "item": 42 }), "Item 42", Some("/item/42"))
        .expect("push_state");
    session.host_mut().user_scroll(0.0, 0.0);
    session.back();
}

fn demo_capture(settings: &RestorationSettings) {
    section("History Interceptor");
    let mut session = list_page(settings);
    session.host_mut().user_scroll(0.0, 2400.0);
    session
        .history()
        .push_state(serde_json::json!({ "item": 42 }), "Item 42", Some("/item/42"))
        .expect("push_state");
    session
        .history()
        .replace_state(serde_json::json!({ "item": 42, "tab": "reviews" }), "Item 42", None)
        .expect("replace_state");

    for entry in session.host().session_history().entries() {
        println!("  {} -> {}", entry.url, entry.state);
    }
    println!();
}

fn demo_immediate_restore(settings: &RestorationSettings) {
    section("Immediate Restoration");
    let mut session = list_page(settings);
    open_item_and_return(&mut session, 1800.0);
    session.run_until_idle().expect("event loop");
    println!("  Scroll position after back: {:?}", session.host().scroll_position());
    println!("  Phase: {:?}", session.phase());
    println!();
}

fn demo_late_content(settings: &RestorationSettings) {
    section("Late Content");
    let mut session = list_page(settings);
    open_item_and_return(&mut session, 5000.0);
    // The list re-renders with only its first screen, then images load.
    session.host_mut().set_content_size(1265.0, 720.0);
    for step in 1..=5 {
        session
            .advance_time(Duration::from_millis(40))
            .expect("event loop");
        session.host_mut().grow_content(1200.0);
        println!(
            "  t={}ms content height {} phase {:?}",
            step * 40,
            session.host().content_size().1,
            session.phase()
        );
    }
    session.run_until_idle().expect("event loop");
    println!("  Scroll requests: {:?}", session.host().scroll_requests());
    println!();
}

fn demo_deadline(settings: &RestorationSettings) {
    section("Deadline Fallback");
    let mut session = list_page(settings);
    open_item_and_return(&mut session, 5000.0);
    session.host_mut().set_content_size(1265.0, 720.0);
    let ran = session.run_until_idle().expect("event loop");
    println!("  Attempts before giving up: {}", ran);
    println!("  Phase: {:?}", session.phase());
    println!();
}

fn demo_cancellation(settings: &RestorationSettings) {
    section("Cancellation");
    let mut session = list_page(settings);
    open_item_and_return(&mut session, 5000.0);
    session.host_mut().set_content_size(1265.0, 720.0);
    session
        .advance_time(Duration::from_millis(500))
        .expect("event loop");
    session.forward();
    println!("  Forward navigation with no stored position: phase {:?}", session.phase());
    session.back();
    session.host_mut().set_content_size(1265.0, 6000.0);
    session.run_until_idle().expect("event loop");
    println!("  Scroll requests: {:?}", session.host().scroll_requests());
    println!();
}
