//! Property-based tests for RestorationSettings persistence.
//!
//! These tests verify that any valid settings survive a save/load cycle
//! through the SettingsEngine, and a plain JSON round-trip, without loss.

use proptest::prelude::*;
use scroll_restore::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use scroll_restore::types::settings::RestorationSettings;
use tempfile::TempDir;

fn arb_settings() -> impl Strategy<Value = RestorationSettings> {
    (proptest::bool::ANY, 0u64..=60_000, 1u64..=5_000).prop_map(
        |(enabled, timeout_ms, retry_interval_ms)| RestorationSettings {
            enabled,
            timeout_ms,
            retry_interval_ms,
        },
    )
}

// **Settings serialization round-trip**
//
// *For any* valid `RestorationSettings`, serializing to JSON then
// deserializing SHALL produce an equivalent struct.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn settings_serialization_roundtrip(settings in arb_settings()) {
        let json = serde_json::to_string(&settings)
            .expect("Serialization to JSON should succeed for any valid settings");

        let deserialized: RestorationSettings = serde_json::from_str(&json)
            .expect("Deserialization from JSON should succeed for valid JSON");

        prop_assert_eq!(deserialized, settings);
    }

    // **Settings persistence round-trip**
    //
    // *For any* valid settings applied key by key, a fresh engine on the same
    // file SHALL load exactly those settings.
    #[test]
    fn settings_persist_through_engine(settings in arb_settings()) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json").to_string_lossy().to_string();

        let mut engine = SettingsEngine::new(Some(path.clone()));
        engine.load().unwrap();
        engine.set_value("enabled", serde_json::json!(settings.enabled)).unwrap();
        engine.set_value("timeout_ms", serde_json::json!(settings.timeout_ms)).unwrap();
        engine
            .set_value("retry_interval_ms", serde_json::json!(settings.retry_interval_ms))
            .unwrap();

        let mut reloaded = SettingsEngine::new(Some(path));
        prop_assert_eq!(reloaded.load().unwrap(), settings);
    }
}
