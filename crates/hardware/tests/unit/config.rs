//! # Configuration Tests
//!
//! JSON parsing, defaults and rejection of malformed documents.

use mipsim_core::common::ConfigError;
use mipsim_core::config::{Config, OverflowPolicy, RegionConfig};
use pretty_assertions::assert_eq;

#[test]
fn test_default_memory_map() {
    let config = Config::default();
    let names: Vec<&str> = config
        .memory
        .regions
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, ["text", "data", "stack", "ktext", "kdata"]);
    assert_eq!(
        config.memory.regions[0],
        RegionConfig::new("text", 0x0040_0000, 0x0010_0000)
    );
    assert_eq!(config.memory.text_region, "text");
    assert_eq!(config.general.overflow_policy, OverflowPolicy::Fatal);
    assert!(!config.general.trace_instructions);
}

#[test]
fn test_empty_document_uses_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.memory.regions.len(), 5);
    assert_eq!(config.general.overflow_policy, OverflowPolicy::Fatal);
}

#[test]
fn test_overflow_policy_accepts_both_cases() {
    let lower = Config::from_json(r#"{"general":{"overflow_policy":"continue"}}"#).unwrap();
    let upper = Config::from_json(r#"{"general":{"overflow_policy":"Continue"}}"#).unwrap();
    assert_eq!(lower.general.overflow_policy, OverflowPolicy::Continue);
    assert_eq!(upper.general.overflow_policy, OverflowPolicy::Continue);
}

#[test]
fn test_custom_text_region() {
    let json = r#"{"memory":{"text_region":"rom","regions":[{"name":"rom","base":0,"size":256}]}}"#;
    let config = Config::from_json(json).unwrap();
    assert_eq!(config.memory.text_region, "rom");
    assert_eq!(config.memory.regions, vec![RegionConfig::new("rom", 0, 256)]);
}

#[test]
fn test_malformed_json_is_parse_error() {
    assert!(matches!(
        Config::from_json("{ not json"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        Config::from_json(r#"{"general":{"overflow_policy":"ignore"}}"#),
        Err(ConfigError::Parse(_))
    ));
}
