//! # Constants
//!
//! Default values for controller and server configuration.

/// Advisory delay returned to the orchestrator between polls (seconds)
pub const DEFAULT_CALLBACK_DELAY_SECONDS: u64 = 5;

/// Timeout applied to every outbound VMC/CSP request (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

/// Refresh the access token when it expires within this window (seconds)
pub const DEFAULT_TOKEN_REFRESH_SKEW_SECS: u64 = 60;

/// Deployment `sddc_size`
pub const DEFAULT_SDDC_SIZE: &str = "medium";

/// Deployment `provider_type` when the model does not name one
pub const DEFAULT_PROVIDER: &str = "AWS";

/// Deployment `deployment_type` when the model does not name one
pub const DEFAULT_DEPLOYMENT_TYPE: &str = "SingleAZ";

/// Default handler server port (also serves metrics and probes)
pub const DEFAULT_HANDLER_PORT: u16 = 8080;

/// Default server startup timeout (seconds)
pub const DEFAULT_SERVER_STARTUP_TIMEOUT_SECS: u64 = 10;

/// Default server readiness poll interval (milliseconds)
pub const DEFAULT_SERVER_POLL_INTERVAL_MS: u64 = 50;

/// Remote state marking a soft-deleted SDDC
pub const SDDC_STATE_DELETED: &str = "DELETED";
