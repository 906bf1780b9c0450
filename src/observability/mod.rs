//! # Observability
//!
//! Prometheus metrics for the lifecycle handler and the VMC client.
//! Tracing is configured once in `runtime::initialization`.

pub mod metrics;
