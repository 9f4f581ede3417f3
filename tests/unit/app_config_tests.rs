/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use kslint::app_config::{Config, LogLevel};
use kslint::errors::AppError;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.scenario_extensions, vec!["ks".to_string()]);
    assert_eq!(config.translation_extensions, vec!["po".to_string()]);
    assert!(!config.check_only);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test that missing fields fall back to defaults when parsing
#[test]
fn test_config_parsing_withEmptyJson_shouldUseDefaults() -> Result<()> {
    let config: Config = serde_json::from_str("{}")?;

    assert_eq!(config.scenario_extensions, vec!["ks".to_string()]);
    assert_eq!(config.log_level, LogLevel::Info);
    Ok(())
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Extension claimed by both kinds
    config.translation_extensions.push("ks".to_string());
    assert!(config.validate().is_err());
    config.translation_extensions = vec!["po".to_string()];

    // Leading dot is not accepted
    config.scenario_extensions = vec![".ks".to_string()];
    assert!(config.validate().is_err());
    config.scenario_extensions = vec!["ks".to_string()];

    // Nothing configured at all
    config.scenario_extensions.clear();
    config.translation_extensions.clear();
    assert!(config.validate().is_err());
}

/// Test that a validation failure carries the config error type
#[test]
fn test_config_validation_withBadExtension_shouldFailWithConfigError() {
    let mut config = Config::default();
    config.scenario_extensions = vec![".ks".to_string()];

    let err = config.validate().unwrap_err();
    assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::Config(_))));
}

/// Test save and reload roundtrip
#[test]
fn test_config_saveAndReload_shouldKeepValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.check_only = true;
    config.log_level = LogLevel::Debug;
    config.save(&path)?;

    let reloaded = Config::from_file(&path)?;
    assert!(reloaded.check_only);
    assert_eq!(reloaded.log_level, LogLevel::Debug);
    assert_eq!(reloaded.scenario_extensions, config.scenario_extensions);
    Ok(())
}

/// Test loading a missing config file fails with context
#[test]
fn test_config_fromFile_withMissingFile_shouldFail() {
    assert!(Config::from_file("missing_conf.json").is_err());
}

/// Test log level conversion to the log crate filter
#[test]
fn test_log_level_toLevelFilter_shouldMapEveryVariant() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Info.to_level_filter(), log::LevelFilter::Info);
    assert_eq!(LogLevel::Debug.to_level_filter(), log::LevelFilter::Debug);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
