//! Config loading and validation tests.

use runway_core::{config::SimConfig, engine::SimEngine, error::SimError};
use std::path::PathBuf;

fn write_temp(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("runway-core-{}-{name}.json", std::process::id()));
    std::fs::write(&path, content).expect("write temp config");
    path
}

#[test]
fn default_config_is_valid() {
    SimConfig::default().validate().expect("default config must validate");
    let engine = SimEngine::build(SimConfig::default()).expect("engine");
    assert_eq!(
        engine.phase_names(),
        vec!["development", "launch", "market", "finance", "drift"]
    );
}

/// Missing sections and fields fall back to defaults.
#[test]
fn partial_file_overrides_only_named_fields() {
    let path = write_temp(
        "partial",
        r#"{ "development": { "productivity_divider": 250.0 }, "initial": { "starting_cash": 5000.0 } }"#,
    );
    let config = SimConfig::load(&path).expect("load");
    std::fs::remove_file(&path).ok();

    assert_eq!(config.development.productivity_divider, 250.0);
    assert_eq!(config.development.max_technical_debt, 0.5);
    assert_eq!(config.initial.starting_cash, 5000.0);
    assert_eq!(config.market.organic_rate, 0.01);
}

#[test]
fn invalid_divider_rejected() {
    let path = write_temp("bad-divider", r#"{ "development": { "productivity_divider": 0.0 } }"#);
    let err = SimConfig::load(&path).expect_err("zero divider must be rejected");
    std::fs::remove_file(&path).ok();

    match err {
        SimError::InvalidConfig { field, .. } => assert_eq!(field, "development.productivity_divider"),
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let path = write_temp("malformed", "{ not json");
    let err = SimConfig::load(&path).expect_err("malformed json");
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, SimError::Serialization(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = SimConfig::load("/definitely/not/here.json").expect_err("missing file");
    assert!(matches!(err, SimError::Io(_)));
}

#[test]
fn engine_refuses_invalid_config() {
    let mut config = SimConfig::default();
    config.pmf.floor = 0.6;
    assert!(SimEngine::build(config).is_err());
}

/// Calibrations are independent values; two engines can differ.
#[test]
fn engines_with_different_configs_coexist() {
    let mut slow = SimConfig::default();
    slow.development.productivity_divider = 666.0;
    let fast = SimConfig::default();

    let a = SimEngine::build(slow).expect("slow");
    let b = SimEngine::build(fast).expect("fast");
    assert_eq!(a.config().development.productivity_divider, 666.0);
    assert_eq!(b.config().development.productivity_divider, 333.0);
}
