//! Tests for array configuration: validation, presets, environment parsing
//! and file round trips.

use super::*;
use crate::error::ArrayError;
use crate::{DEFAULT_INITIAL_CAPACITY, DynamicArray};
use std::env;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_default_config() {
    let config = ArrayConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.initial_capacity, DEFAULT_INITIAL_CAPACITY);
    assert_eq!(config.growth, GrowthStrategy::Doubling);
    assert_eq!(config.policy().next_capacity(10), 20);
}

#[test]
fn test_all_presets_valid() {
    assert!(ArrayConfig::performance_preset().validate().is_ok());
    assert!(ArrayConfig::memory_preset().validate().is_ok());
    assert!(ArrayConfig::realtime_preset().validate().is_ok());
    assert!(ArrayConfig::balanced_preset().validate().is_ok());
}

#[test]
fn test_preset_characteristics() {
    let perf = ArrayConfig::performance_preset();
    let mem = ArrayConfig::memory_preset();
    let realtime = ArrayConfig::realtime_preset();

    assert!(perf.initial_capacity > mem.initial_capacity);
    assert!(realtime.initial_capacity > perf.initial_capacity);
    assert_eq!(mem.growth, GrowthStrategy::GoldenRatio);
    assert_eq!(ArrayConfig::balanced_preset(), ArrayConfig::default());
}

#[test]
fn test_validation_errors() {
    let zero = ArrayConfig::default().with_initial_capacity(0);
    assert!(matches!(zero.validate(), Err(ArrayError::Configuration { .. })));

    let flat = ArrayConfig::default().with_growth(GrowthStrategy::Linear { step: 0 });
    let err = flat.validate().unwrap_err();
    assert!(err.to_string().contains("linear growth step"));
}

#[test]
fn test_growth_strategy_parsing() {
    assert_eq!("doubling".parse::<GrowthStrategy>().unwrap(), GrowthStrategy::Doubling);
    assert_eq!(" Golden ".parse::<GrowthStrategy>().unwrap(), GrowthStrategy::GoldenRatio);
    assert_eq!("golden_ratio".parse::<GrowthStrategy>().unwrap(), GrowthStrategy::GoldenRatio);
    assert_eq!(
        "linear:16".parse::<GrowthStrategy>().unwrap(),
        GrowthStrategy::Linear { step: 16 }
    );
    assert!("linear:".parse::<GrowthStrategy>().is_err());
    assert!("linear:x".parse::<GrowthStrategy>().is_err());
    assert!("tripling".parse::<GrowthStrategy>().is_err());
}

#[test]
fn test_growth_strategy_display_round_trip() {
    for strategy in [
        GrowthStrategy::Doubling,
        GrowthStrategy::GoldenRatio,
        GrowthStrategy::Linear { step: 7 },
    ] {
        let text = strategy.to_string();
        assert_eq!(text.parse::<GrowthStrategy>().unwrap(), strategy, "{}", text);
    }
}

// Environment mutation is only sound while no other thread touches the
// environment, so every test below that sets or reads variables is serialized.

#[test]
#[serial_test::serial]
fn test_environment_variable_parsing() {
    // SAFETY: serialized; no other test thread accesses the environment
    unsafe {
        env::set_var("TEST_ENV_INITIAL_CAPACITY", "32");
        env::set_var("TEST_ENV_GROWTH", "linear:8");
    }

    let config = ArrayConfig::from_env_with_prefix("TEST_ENV_").unwrap();
    assert_eq!(config.initial_capacity, 32);
    assert_eq!(config.growth, GrowthStrategy::Linear { step: 8 });

    // SAFETY: as above
    unsafe {
        env::remove_var("TEST_ENV_INITIAL_CAPACITY");
        env::remove_var("TEST_ENV_GROWTH");
    }
}

#[test]
#[serial_test::serial]
fn test_environment_fallback_to_defaults() {
    // SAFETY: serialized; no other test thread accesses the environment
    unsafe { env::set_var("TEST_FALLBACK_INITIAL_CAPACITY", "not a number"); }

    let config = ArrayConfig::from_env_with_prefix("TEST_FALLBACK_").unwrap();
    assert_eq!(config, ArrayConfig::default());

    // SAFETY: as above
    unsafe { env::remove_var("TEST_FALLBACK_INITIAL_CAPACITY"); }
}

#[test]
#[serial_test::serial]
fn test_environment_invalid_value_rejected() {
    // SAFETY: serialized; no other test thread accesses the environment
    unsafe { env::set_var("TEST_INVALID_INITIAL_CAPACITY", "0"); }

    let result = ArrayConfig::from_env_with_prefix("TEST_INVALID_");
    assert!(matches!(result, Err(ArrayError::Configuration { .. })));

    // SAFETY: as above
    unsafe { env::remove_var("TEST_INVALID_INITIAL_CAPACITY"); }
}

#[test]
#[serial_test::serial]
fn test_environment_unknown_growth_rejected() {
    // SAFETY: serialized; no other test thread accesses the environment
    unsafe { env::set_var("TEST_GROWTH_TYPO_GROWTH", "tripling"); }

    let err = ArrayConfig::from_env_with_prefix("TEST_GROWTH_TYPO_").unwrap_err();
    assert!(matches!(err, ArrayError::Configuration { .. }));
    assert!(err.to_string().contains("unknown growth strategy 'tripling'"));

    // SAFETY: as above
    unsafe { env::set_var("TEST_GROWTH_TYPO_GROWTH", "linear:abc"); }
    let err = ArrayConfig::from_env_with_prefix("TEST_GROWTH_TYPO_").unwrap_err();
    assert!(err.to_string().contains("invalid linear step"));

    // SAFETY: as above
    unsafe { env::remove_var("TEST_GROWTH_TYPO_GROWTH"); }
}

#[test]
#[serial_test::serial]
fn test_environment_unset_growth_keeps_default() {
    let config = ArrayConfig::from_env_with_prefix("TEST_NEVER_SET_").unwrap();
    assert_eq!(config.growth, GrowthStrategy::Doubling);
}

#[test]
#[serial_test::serial]
fn test_parse_env_var() {
    // SAFETY: serialized; no other test thread accesses the environment
    unsafe { env::set_var("TEST_PARSE_USIZE", " 42 "); }
    assert_eq!(parse_env_var("TEST_PARSE_USIZE", 0usize), 42);
    assert_eq!(parse_env_var("TEST_PARSE_MISSING", 7usize), 7);
    // SAFETY: as above
    unsafe { env::remove_var("TEST_PARSE_USIZE"); }
}

#[test]
fn test_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("array.json");

    let config = ArrayConfig::default()
        .with_initial_capacity(12)
        .with_growth(GrowthStrategy::Linear { step: 3 });
    config.save_to_file(&path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"initial_capacity\": 12"));
    assert!(content.contains("\"kind\": \"linear\""));

    let loaded = ArrayConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_rejects_invalid_file() {
    let dir = tempdir().unwrap();

    let garbage = dir.path().join("garbage.json");
    fs::write(&garbage, "{ not json").unwrap();
    let err = ArrayConfig::load_from_file(&garbage).unwrap_err();
    assert!(err.to_string().contains("Failed to parse"));

    let invalid = dir.path().join("invalid.json");
    fs::write(&invalid, r#"{"initial_capacity": 0, "growth": {"kind": "doubling"}}"#).unwrap();
    assert!(ArrayConfig::load_from_file(&invalid).is_err());

    let missing = dir.path().join("missing.json");
    let err = ArrayConfig::load_from_file(&missing).unwrap_err();
    assert!(err.to_string().contains("Failed to read"));
}

#[test]
fn test_config_drives_array() {
    let array: DynamicArray<u32> = DynamicArray::with_config(&ArrayConfig::memory_preset()).unwrap();
    assert_eq!(array.capacity(), 4);
    assert_eq!(array.policy().label(), "golden_ratio");
}
