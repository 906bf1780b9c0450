//! # Server Configuration
//!
//! HTTP server settings loaded from environment variables.

use super::env_var_or_default;
use crate::constants::{
    DEFAULT_HANDLER_PORT, DEFAULT_SERVER_POLL_INTERVAL_MS, DEFAULT_SERVER_STARTUP_TIMEOUT_SECS,
};

/// Listener settings for `sddc-controller`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Port serving the handler endpoint, metrics and health probes
    pub port: u16,
    /// Give up on startup if the listener is not bound within this many seconds
    pub startup_timeout_secs: u64,
    /// Readiness check interval during startup (milliseconds)
    pub poll_interval_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_HANDLER_PORT,
            startup_timeout_secs: DEFAULT_SERVER_STARTUP_TIMEOUT_SECS,
            poll_interval_ms: DEFAULT_SERVER_POLL_INTERVAL_MS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults
    ///
    /// `HANDLER_PORT` wins over `METRICS_PORT`; both name the single listener.
    pub fn from_env() -> Self {
        let metrics_port = env_var_or_default("METRICS_PORT", DEFAULT_HANDLER_PORT);
        Self {
            port: env_var_or_default("HANDLER_PORT", metrics_port),
            startup_timeout_secs: env_var_or_default(
                "SERVER_STARTUP_TIMEOUT_SECS",
                DEFAULT_SERVER_STARTUP_TIMEOUT_SECS,
            ),
            poll_interval_ms: env_var_or_default(
                "SERVER_POLL_INTERVAL_MS",
                DEFAULT_SERVER_POLL_INTERVAL_MS,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_share_one_listener() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert!(config.poll_interval_ms < config.startup_timeout_secs * 1000);
    }
}
