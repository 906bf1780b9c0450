//! # Metrics Module
//!
//! Prometheus metrics for monitoring the controller, organized by responsibility.
//!
//! ## Sub-modules
//!
//! - `registry` - Metrics registry setup, registration and text encoding
//! - `handler_metrics` - Invocations, outcomes, submissions and task polls
//! - `provider_metrics` - VMC/CSP request counts and latencies

pub mod handler_metrics;
pub mod provider_metrics;
pub mod registry;

pub use handler_metrics::*;
pub use provider_metrics::*;
pub use registry::*;
