//! # Controller Configuration
//!
//! Process-wide configuration loaded once from environment variables at startup.
//!
//! All configuration has sensible defaults and can be overridden via environment variables.
//! The loaded values are shared behind an `Arc` and never mutated afterwards.

mod controller;
mod server;

pub use controller::ControllerConfig;
pub use server::ServerConfig;

use std::sync::Arc;

/// Shared, immutable controller configuration
pub type SharedControllerConfig = Arc<ControllerConfig>;

/// Load configuration from environment variables with defaults
pub fn load_config() -> (ControllerConfig, ServerConfig) {
    (ControllerConfig::from_env(), ServerConfig::from_env())
}

/// Read environment variable or return default value
///
/// Unparseable values fall back to the default.
pub(crate) fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_or_default_missing() {
        let value: u64 = env_var_or_default("SDDC_CONTROLLER_TEST_UNSET_VAR", 42);
        assert_eq!(value, 42);
    }

    #[test]
    fn test_env_var_or_default_parses() {
        std::env::set_var("SDDC_CONTROLLER_TEST_PARSE_VAR", " 17 ");
        let value: u64 = env_var_or_default("SDDC_CONTROLLER_TEST_PARSE_VAR", 42);
        assert_eq!(value, 17);
    }

    #[test]
    fn test_env_var_or_default_unparseable() {
        std::env::set_var("SDDC_CONTROLLER_TEST_BAD_VAR", "not-a-number");
        let value: u64 = env_var_or_default("SDDC_CONTROLLER_TEST_BAD_VAR", 42);
        assert_eq!(value, 42);
    }
}
