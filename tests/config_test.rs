//! Configuration tests
//!
//! This module contains tests for the configuration system.

use std::env;
use std::fs;

use forward_proxy::config::{ProxyConfig, ENV_PREFIX};
use serial_test::serial;
use tempfile::tempdir;

/// Test default configuration
#[test]
fn test_default_config() {
    let config = ProxyConfig::default();

    assert_eq!(config.listen.to_string(), "0.0.0.0:8006");
    assert_eq!(config.log_level, "info");
    assert_eq!(config.buffer_size, 8192);
    assert_eq!(config.environment, "production");
}

/// Test configuration from file
#[test]
fn test_file_config() {
    let config_content = r#"{
        "listen": "127.0.0.1:9000",
        "log_level": "debug",
        "buffer_size": 16384
    }"#;

    let dir = tempdir().expect("Failed to create temp dir");
    let config_path = dir.path().join("config.json");
    fs::write(&config_path, config_content).expect("Failed to write test config file");

    let config = ProxyConfig::from_file(&config_path).expect("Failed to load config from file");

    assert_eq!(config.listen.to_string(), "127.0.0.1:9000");
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.buffer_size, 16384);
    // Unspecified fields fall back to defaults
    assert_eq!(config.environment, "production");
}

/// Test loading a missing or malformed file
#[test]
fn test_file_config_errors() {
    assert!(ProxyConfig::from_file("does-not-exist.json").is_err());

    let dir = tempdir().expect("Failed to create temp dir");
    let config_path = dir.path().join("bad.json");
    fs::write(&config_path, "{ not json").unwrap();
    assert!(ProxyConfig::from_file(&config_path).is_err());
}

/// Test that later sources take priority in a merge chain
#[test]
fn test_merge_priority() {
    let file_config: ProxyConfig =
        serde_json::from_str(r#"{"listen": "127.0.0.1:8100", "log_level": "warn"}"#).unwrap();
    let cli_config = ProxyConfig::from_args("127.0.0.1:8200", "trace").unwrap();

    let config = ProxyConfig::default().merge(file_config).merge(cli_config);

    // The CLI layer was merged last, so it wins
    assert_eq!(config.listen.to_string(), "127.0.0.1:8200");
    assert_eq!(config.log_level, "trace");
}

/// Test configuration from environment variables
#[test]
#[serial]
fn test_env_config() {
    env::set_var(format!("{}LISTEN", ENV_PREFIX), "127.0.0.1:8300");
    env::set_var(format!("{}LOG_LEVEL", ENV_PREFIX), "debug");
    env::set_var(format!("{}BUFFER_SIZE", ENV_PREFIX), "4096");

    let config = ProxyConfig::from_env().expect("Failed to load config from environment");

    assert_eq!(config.listen.to_string(), "127.0.0.1:8300");
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.buffer_size, 4096);

    env::remove_var(format!("{}LISTEN", ENV_PREFIX));
    env::remove_var(format!("{}LOG_LEVEL", ENV_PREFIX));
    env::remove_var(format!("{}BUFFER_SIZE", ENV_PREFIX));
}

/// Test invalid environment values
#[test]
#[serial]
fn test_env_config_invalid_buffer_size() {
    env::set_var(format!("{}BUFFER_SIZE", ENV_PREFIX), "not-a-number");

    let result = ProxyConfig::from_env();
    assert!(result.is_err(), "Invalid buffer size should be rejected");

    env::remove_var(format!("{}BUFFER_SIZE", ENV_PREFIX));
}
