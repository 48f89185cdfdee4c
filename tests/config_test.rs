//! Tests for session configuration loading.

use noughts::SessionConfig;
use std::io::Write;
use std::time::Duration;

#[test]
fn test_defaults() {
    let config = SessionConfig::default();
    assert_eq!(*config.computer_delay_ms(), 500);
    assert_eq!(config.computer_delay(), Duration::from_millis(500));
    assert_eq!(config.log_filter(), "info");
    assert_eq!(config.log_file(), "noughts.log");
}

#[test]
fn test_partial_file_fills_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "computer_delay_ms = 250").unwrap();

    let config = SessionConfig::from_file(file.path()).unwrap();

    assert_eq!(*config.computer_delay_ms(), 250);
    assert_eq!(config.log_filter(), "info");
}

#[test]
fn test_full_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "computer_delay_ms = 0\nlog_filter = \"debug,noughts=trace\"\nlog_file = \"/tmp/x.log\""
    )
    .unwrap();

    let config = SessionConfig::from_file(file.path()).unwrap();

    assert_eq!(*config.computer_delay_ms(), 0);
    assert_eq!(config.log_filter(), "debug,noughts=trace");
    assert_eq!(config.log_file(), "/tmp/x.log");
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "computer_delay_ms = \"soon\"").unwrap();

    let err = SessionConfig::from_file(file.path()).unwrap_err();

    assert!(err.message.contains("Failed to parse config"));
    assert!(err.to_string().starts_with("Config error:"));
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = SessionConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, SessionConfig::default());
}

#[test]
fn test_missing_file_is_an_error_for_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = SessionConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_delay_override() {
    let config = SessionConfig::default().with_computer_delay_ms(10);
    assert_eq!(config.computer_delay(), Duration::from_millis(10));
}
