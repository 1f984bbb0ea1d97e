//! Configuration structures and methods
//!
//! This module defines the proxy configuration structure and related methods
//! for loading configuration from different sources (command-line arguments,
//! environment variables, and configuration files).

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::fs;

use crate::common::{ProxyError, Result, parse_socket_addr};
use crate::config::defaults;

/// Proxy configuration
///
/// Contains all configuration options needed for the proxy server.
/// Supports loading from command-line arguments, environment variables,
/// and configuration files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listen address for the proxy server
    #[serde(default = "defaults::listen")]
    pub listen: SocketAddr,

    /// Log level (debug, info, warn, error)
    #[serde(default = "defaults::log_level")]
    pub log_level: String,

    /// Buffer size used by the tunnel relay copy loops, in bytes
    #[serde(default = "defaults::buffer_size")]
    pub buffer_size: usize,

    /// Environment name (development, testing, production)
    #[serde(default = "defaults::environment")]
    pub environment: String,
}

impl Default for ProxyConfig {
    /// Create a default configuration using centralized defaults
    fn default() -> Self {
        Self {
            listen: defaults::listen(),
            log_level: defaults::log_level(),
            buffer_size: defaults::buffer_size(),
            environment: defaults::environment(),
        }
    }
}

impl ProxyConfig {
    /// Create configuration from command-line arguments
    ///
    /// # Parameters
    ///
    /// * `listen` - Listen address string
    /// * `log_level` - Log level string
    ///
    /// # Returns
    ///
    /// Returns the configuration result
    pub fn from_args(listen: &str, log_level: &str) -> Result<Self> {
        Ok(Self {
            listen: parse_socket_addr(listen)?,
            log_level: log_level.to_string(),
            ..Self::default()
        })
    }

    /// Merge another configuration into this one
    ///
    /// Values from `other` take priority; callers build `other` from a
    /// fully-populated source (serde defaults fill any gaps).
    pub fn merge(&self, other: Self) -> Self {
        Self {
            listen: other.listen,
            log_level: other.log_level,
            buffer_size: other.buffer_size,
            environment: other.environment,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Reads the `FORWARD_PROXY_*` variables; unset variables leave the
    /// defaults in place.
    ///
    /// # Returns
    ///
    /// Returns the configuration result
    pub fn from_env() -> Result<Self> {
        let get_env = |name: &str| -> Option<String> {
            std::env::var(format!("{}{}", defaults::ENV_PREFIX, name)).ok()
        };

        let mut config = Self::default();

        if let Some(listen) = get_env("LISTEN") {
            config.listen = parse_socket_addr(&listen)?;
        }

        if let Some(log_level) = get_env("LOG_LEVEL") {
            config.log_level = log_level;
        }

        if let Some(buffer_size) = get_env("BUFFER_SIZE") {
            config.buffer_size = buffer_size.parse().map_err(|e| {
                ProxyError::Config(format!("Invalid buffer size: {}", e))
            })?;
        }

        if let Some(environment) = get_env("ENVIRONMENT") {
            config.environment = environment;
        }

        Ok(config)
    }

    /// Load configuration from file
    ///
    /// # Parameters
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// Returns the configuration result
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ProxyError::Config(format!(
                "Failed to read configuration file {}: {}", path.display(), e
            )))?;

        serde_json::from_str(&content)
            .map_err(|e| ProxyError::Config(format!(
                "Failed to parse configuration file {}: {}", path.display(), e
            )))
    }

    /// Validate the configuration
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` if the configuration is valid, otherwise returns an error.
    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(ProxyError::Config(
                "Buffer size must be greater than zero".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ProxyError::Config(format!(
                    "Invalid log level: {}. Valid values are: trace, debug, info, warn, error",
                    other
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProxyConfig::default();
        assert_eq!(config.listen.port(), 8006);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.buffer_size, defaults::BUFFER_SIZE);
    }

    #[test]
    fn test_from_args() {
        let config = ProxyConfig::from_args("127.0.0.1:9000", "debug")
            .expect("Should be able to create configuration from arguments");
        assert_eq!(config.listen.port(), 9000);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_merge_overrides() {
        let base = ProxyConfig::default();
        let other = ProxyConfig::from_args("127.0.0.1:9000", "warn").unwrap();
        let merged = base.merge(other);
        assert_eq!(merged.listen.port(), 9000);
        assert_eq!(merged.log_level, "warn");
    }

    #[test]
    fn test_validate() {
        let config = ProxyConfig::default();
        assert!(config.validate().is_ok());

        let mut config = ProxyConfig::default();
        config.buffer_size = 0;
        assert!(config.validate().is_err());

        let mut config = ProxyConfig::default();
        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_content() {
        // Unknown fields are rejected, missing fields fall back to defaults
        let config: ProxyConfig =
            serde_json::from_str(r#"{"listen": "0.0.0.0:8100"}"#).unwrap();
        assert_eq!(config.listen.port(), 8100);
        assert_eq!(config.log_level, "info");

        let result: std::result::Result<ProxyConfig, _> =
            serde_json::from_str(r#"{"unknown_field": true}"#);
        assert!(result.is_err());
    }
}
