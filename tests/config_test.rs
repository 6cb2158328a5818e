//! Tests for config loading

use std::io::Write;

use pulsecheck::config::{CadenceMode, Config};
use pulsecheck::error::ConfigError;

#[test]
fn test_from_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[checker]
urls = ["https://example.com", "https://example.org/health"]
base_delay_secs = 5
backoff_coefficient = 3
max_delay_secs = 120
request_timeout_secs = 4
cadence = "fixed"

[logging]
level = "debug"
format = "json"
"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.checker.urls.len(), 2);
    assert_eq!(config.checker.base_delay_secs, 5);
    assert_eq!(config.checker.backoff_coefficient, 3);
    assert_eq!(config.checker.max_delay_secs, 120);
    assert_eq!(config.checker.cadence, CadenceMode::Fixed);
    assert_eq!(config.logging.level, "debug");
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_file_missing_file() {
    let result = Config::from_file(std::path::Path::new("/nonexistent/pulsecheck.toml"));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn test_from_file_malformed_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "this is not toml at all [[[").unwrap();

    let result = Config::from_file(file.path());
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn test_sample_config_exists_and_validates() {
    let config_path = std::path::Path::new("config.toml");
    assert!(
        config_path.exists(),
        "config.toml should exist in project root"
    );

    let config = Config::from_file(config_path).expect("sample config should parse");
    assert!(config.validate().is_ok(), "sample config should validate");
}

#[test]
fn test_validation_rejects_max_below_base() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[checker]
urls = ["https://example.com"]
base_delay_secs = 60
max_delay_secs = 10
"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::MaxDelayBelowBase)
    ));
}
