//! Logging utility functions
//!
//! This module provides utility functions for the logging system.

/// Initialize the logging system
///
/// # Parameters
///
/// * `level` - Log level
pub fn init_logger(level: &str) {
    let env = env_logger::Env::default()
        .filter_or("RUST_LOG", level);

    env_logger::init_from_env(env);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger() {
        // This initializes the global logger, which may affect other tests,
        // so we only make sure the function does not panic.
        init_logger("debug");
    }
}
