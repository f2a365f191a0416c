//! Config Validation Tests
//!
//! Typo detection and range validation for the proxy config, exercised
//! independently from the simulation pipeline.

use eor_simulator::config::validation::{
    known_config_keys, suggest_correction, validate_physical_ranges, validate_unknown_keys,
};
use eor_simulator::config::{ConfigError, ModelPreset, ProxyConfig};

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_model_key_warns_with_suggestion() {
    let toml_str = r#"
[model]
base_oil_bpod = 2900.0
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("base_oil_bpod"));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("model.base_oil_bopd"));
}

#[test]
fn typo_in_field_section_warns() {
    let toml_str = r#"
[field]
naem = "Norne"
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].suggestion.as_deref(), Some("field.name"));
}

#[test]
fn valid_config_produces_zero_warnings() {
    let toml_str = r#"
preset = "high-base"

[field]
name = "Volve"

[model]
base_oil_bopd = 3000.0
rating_threshold = 500.0
favorable_label = "OPTIMAL"
unfavorable_label = "STABLE"

[controls]
injection_min_bwpd = 0.0
injection_max_bwpd = 30000.0
injection_default_bwpd = 10000.0
sweep_percent_min = 5.0
sweep_percent_max = 50.0
sweep_percent_default = 20.0
lag_options_days = [15, 30, 45, 60, 90]
lag_default_days = 30

[forecast]
domain_max_bwpd = 35000.0
sample_count = 100

[server]
addr = "127.0.0.1:9090"
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert!(
        warnings.is_empty(),
        "Valid config should produce 0 warnings, got: {:?}",
        warnings.iter().map(|w| &w.field).collect::<Vec<_>>()
    );
    let config = ProxyConfig::from_toml_str(toml_str, None).unwrap();
    assert_eq!(config.server.addr, "127.0.0.1:9090");
}

#[test]
fn unknown_section_warns_but_loads() {
    let toml_str = r#"
[history_matching]
enabled = true
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert!(warnings.iter().any(|w| w.field == "history_matching"));
    // Unknown keys never break a config
    assert!(ProxyConfig::from_toml_str(toml_str, None).is_ok());
}

#[test]
fn suggestion_requires_close_match() {
    let known = known_config_keys();
    assert_eq!(
        suggest_correction("forecast.sample_cont", &known).as_deref(),
        Some("forecast.sample_count")
    );
    assert!(suggest_correction("zzzz.zzzz", &known).is_none());
}

// ============================================================================
// Range Validation
// ============================================================================

#[test]
fn default_config_has_no_range_issues() {
    let (errors, warnings) = validate_physical_ranges(&ProxyConfig::default());
    assert!(errors.is_empty(), "errors: {errors:?}");
    assert!(warnings.is_empty());
}

#[test]
fn negative_base_oil_is_error() {
    let mut config = ProxyConfig::default();
    config.model.base_oil_bopd = -100.0;
    let (errors, _) = validate_physical_ranges(&config);
    assert!(errors.iter().any(|e| e.contains("base_oil_bopd")));
    assert!(config.validate().is_err());
}

#[test]
fn zero_base_oil_is_allowed() {
    let mut config = ProxyConfig::default();
    config.model.base_oil_bopd = 0.0;
    assert!(config.validate().is_ok());
}

#[test]
fn sweep_range_beyond_hundred_percent_is_error() {
    let mut config = ProxyConfig::default();
    config.controls.sweep_percent_max = 120.0;
    let (errors, _) = validate_physical_ranges(&config);
    assert!(errors.iter().any(|e| e.contains("sweep_percent")));
}

#[test]
fn narrow_forecast_domain_warns() {
    let mut config = ProxyConfig::default();
    config.forecast.domain_max_bwpd = 20_000.0;
    let (errors, warnings) = validate_physical_ranges(&config);
    assert!(errors.is_empty());
    assert!(warnings.iter().any(|w| w.field == "forecast.domain_max_bwpd"));
    // Warning only: still a valid config
    assert!(config.validate().is_ok());
}

#[test]
fn non_positive_threshold_warns() {
    let mut config = ProxyConfig::default();
    config.model.rating_threshold = 0.0;
    let (errors, warnings) = validate_physical_ranges(&config);
    assert!(errors.is_empty());
    assert!(warnings.iter().any(|w| w.field == "model.rating_threshold"));
}

#[test]
fn blank_label_is_error() {
    let mut config = ProxyConfig::default();
    config.model.favorable_label = "  ".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn invalid_file_value_is_rejected_on_load() {
    let toml_str = r#"
[forecast]
sample_count = 1
"#;
    let result = ProxyConfig::from_toml_str(toml_str, None);
    match result {
        Err(ConfigError::Validation(errors)) => {
            assert!(errors.iter().any(|e| e.contains("sample_count")));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn malformed_toml_is_parse_error() {
    let result = ProxyConfig::from_toml_str("[model\nbase_oil_bopd = ", None);
    assert!(matches!(result, Err(ConfigError::Parse(_, _))));
}

#[test]
fn wrong_value_type_is_parse_error() {
    let result = ProxyConfig::from_toml_str("[model]\nbase_oil_bopd = \"lots\"\n", None);
    assert!(matches!(result, Err(ConfigError::Parse(_, _))));
}

#[test]
fn preset_file_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("eor_config.toml");
    let original = ProxyConfig::for_preset(ModelPreset::HighBase);
    std::fs::write(&path, original.to_toml().unwrap()).unwrap();

    let loaded = ProxyConfig::load(Some(&path), None).unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn nan_control_bound_is_rejected_on_load() {
    let toml_str = r#"
[controls]
injection_max_bwpd = nan
"#;
    let result = ProxyConfig::from_toml_str(toml_str, None);
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}
