//! Property-based tests for ReaderConfig serialization round-trip.

use chapter_reader::types::settings::{LoggingSettings, ReaderConfig, StorageSettings, TimingSettings};
use proptest::prelude::*;

fn arb_storage_settings() -> impl Strategy<Value = StorageSettings> {
    (
        proptest::option::of("[a-zA-Z0-9/._-]{1,40}"),
        "[a-z:/.]{1,30}",
    )
        .prop_map(|(database_path, origin)| StorageSettings {
            database_path,
            origin,
        })
}

fn arb_timing_settings() -> impl Strategy<Value = TimingSettings> {
    (0u64..=10_000, 0u64..=1_000, 0u64..=1_000).prop_map(
        |(scroll_save_debounce_ms, nav_layout_delay_ms, initial_progress_delay_ms)| TimingSettings {
            scroll_save_debounce_ms,
            nav_layout_delay_ms,
            initial_progress_delay_ms,
        },
    )
}

fn arb_reader_config() -> impl Strategy<Value = ReaderConfig> {
    (
        arb_storage_settings(),
        arb_timing_settings(),
        prop_oneof![Just("error"), Just("warn"), Just("info"), Just("debug")],
    )
        .prop_map(|(storage, timing, level)| ReaderConfig {
            storage,
            timing,
            logging: LoggingSettings {
                level: level.to_string(),
            },
        })
}

// *For any* valid `ReaderConfig`, serializing to JSON then deserializing
// yields an equal value.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn reader_config_serialization_roundtrip(config in arb_reader_config()) {
        let json = serde_json::to_string(&config)
            .expect("Serialization to JSON should succeed for any ReaderConfig");

        let deserialized: ReaderConfig = serde_json::from_str(&json)
            .expect("Deserialization from JSON should succeed for valid JSON");

        prop_assert_eq!(deserialized, config);
    }
}
