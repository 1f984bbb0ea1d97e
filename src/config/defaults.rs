//! Default configuration values
//!
//! This module provides default values for configuration options.
//! It is designed to be a single source of truth for defaults,
//! making it easier to maintain consistent defaults across the application.

use std::net::SocketAddr;
use std::str::FromStr;

/// Environment variable prefix for all configuration options
pub const ENV_PREFIX: &str = "FORWARD_PROXY_";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

// String constants for default values

/// Default listen address as string
pub const LISTEN_STR: &str = "0.0.0.0:8006";

/// Default log level as string
pub const LOG_LEVEL_STR: &str = "info";

/// Default relay copy buffer size in bytes
pub const BUFFER_SIZE: usize = 8192;

// Functions for default values

/// Default listen address
pub fn listen() -> SocketAddr {
    SocketAddr::from_str(LISTEN_STR)
        .expect("Default listen address should be valid")
}

/// Default log level
pub fn log_level() -> String {
    LOG_LEVEL_STR.to_string()
}

/// Default relay buffer size
pub fn buffer_size() -> usize {
    BUFFER_SIZE
}

/// Default environment name
pub fn environment() -> String {
    "production".to_string()
}
