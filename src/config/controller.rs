//! # Lifecycle Configuration
//!
//! Settings that shape how the lifecycle handler talks to VMC.

use super::env_var_or_default;
use crate::constants::{
    DEFAULT_CALLBACK_DELAY_SECONDS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SDDC_SIZE,
    DEFAULT_TOKEN_REFRESH_SKEW_SECS,
};
use std::time::Duration;

/// Controller configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Delay suggested to the orchestrator between polls (seconds)
    pub callback_delay_secs: u64,
    /// Per-request timeout for VMC and CSP calls (seconds)
    pub request_timeout_secs: u64,
    /// Refresh the access token when it expires within this many seconds
    pub token_refresh_skew_secs: u64,
    /// `sddc_size` sent with deployments
    pub sddc_size: String,
    /// `skip_creating_vxlan` sent with deployments
    pub skip_creating_vxlan: bool,
    /// Append `force=true` to SDDC deletions
    pub force_delete: bool,
    /// Fetch progress metrics for deployment tasks while polling
    pub retrieve_task_progress: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            callback_delay_secs: DEFAULT_CALLBACK_DELAY_SECONDS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            token_refresh_skew_secs: DEFAULT_TOKEN_REFRESH_SKEW_SECS,
            sddc_size: DEFAULT_SDDC_SIZE.to_string(),
            skip_creating_vxlan: false,
            force_delete: false,
            retrieve_task_progress: true,
        }
    }
}

impl ControllerConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            callback_delay_secs: env_var_or_default(
                "CALLBACK_DELAY_SECONDS",
                defaults.callback_delay_secs,
            ),
            request_timeout_secs: env_var_or_default(
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            ),
            token_refresh_skew_secs: env_var_or_default(
                "TOKEN_REFRESH_SKEW_SECS",
                defaults.token_refresh_skew_secs,
            ),
            sddc_size: env_var_or_default("SDDC_SIZE", defaults.sddc_size),
            skip_creating_vxlan: env_var_or_default(
                "SKIP_CREATING_VXLAN",
                defaults.skip_creating_vxlan,
            ),
            force_delete: env_var_or_default("FORCE_DELETE", defaults.force_delete),
            retrieve_task_progress: env_var_or_default(
                "RETRIEVE_TASK_PROGRESS",
                defaults.retrieve_task_progress,
            ),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn token_refresh_skew(&self) -> Duration {
        Duration::from_secs(self.token_refresh_skew_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ControllerConfig::default();
        assert_eq!(config.callback_delay_secs, 5);
        assert_eq!(config.request_timeout(), Duration::from_secs(20));
        assert_eq!(config.token_refresh_skew(), Duration::from_secs(60));
        assert_eq!(config.sddc_size, "medium");
        assert!(!config.skip_creating_vxlan);
        assert!(!config.force_delete);
        assert!(config.retrieve_task_progress);
    }
}
