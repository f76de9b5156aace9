use std::io::Write as _;

use super::*;

#[test]
fn empty_document_yields_defaults() {
    let config = GestureConfig::from_toml_str("").expect("empty config should parse");
    assert_eq!(config, DEFAULT_CONFIG);
}

#[test]
fn partial_document_overrides_only_named_fields() {
    let config = GestureConfig::from_toml_str(
        r#"
        max_pointers = 5
        minimal_hit_testing = false
        min_swipe_distance = 42.5
        "#,
    )
    .expect("partial config should parse");

    assert_eq!(config.max_pointers, 5);
    assert!(!config.minimal_hit_testing);
    assert_eq!(config.min_swipe_distance, 42.5);
    assert_eq!(config.max_tap_ms, DEFAULT_CONFIG.max_tap_ms);
    assert_eq!(config.stationary_radius, DEFAULT_CONFIG.stationary_radius);
}

#[test]
fn semantic_validation_rejects_invalid_values() {
    let cases = [
        ("max_pointers = 0", "max_pointers must be >= 1"),
        ("max_tap_ms = 0\nsuspicious_tap_ms = 0", "max_tap_ms must be > 0"),
        (
            "max_tap_ms = 100\nsuspicious_tap_ms = 150",
            "suspicious_tap_ms must be <= max_tap_ms",
        ),
        ("stationary_radius = -1.0", "stationary_radius must be"),
        ("min_swipe_distance = -0.5", "min_swipe_distance must be"),
    ];

    for (source, expected_msg) in cases {
        let err = GestureConfig::from_toml_str(source).expect_err("config should fail validation");
        match err {
            ConfigError::Validation(msg) => {
                assert!(
                    msg.contains(expected_msg),
                    "expected validation message containing `{expected_msg}`, got `{msg}`"
                );
            }
            other => panic!("expected validation error, got {other}"),
        }
    }
}

#[test]
fn parse_errors_are_reported_for_schema_mismatches() {
    let err = GestureConfig::from_toml_str("max_taps_ms = 100").expect_err("unknown key");
    match err {
        ConfigError::Parse(msg) => {
            assert!(
                msg.contains("max_taps_ms"),
                "expected parse error mentioning the unknown key, got `{msg}`"
            );
        }
        other => panic!("expected parse error, got {other}"),
    }

    let err = GestureConfig::from_toml_str("max_tap_ms = \"fast\"").expect_err("bad type");
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn from_path_reads_file_and_reports_missing_files() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "max_swipe_ms = 250").expect("write config");

    let config = GestureConfig::from_path(file.path()).expect("config should load");
    assert_eq!(config.max_swipe_ms, 250);

    let missing = file.path().with_extension("missing");
    let err = GestureConfig::from_path(&missing).expect_err("missing file");
    assert!(matches!(err, ConfigError::Io { .. }));
}
