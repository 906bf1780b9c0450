//! # Provider Metrics
//!
//! Request counts and latencies of VMC and CSP API calls.

use crate::observability::metrics::registry::REGISTRY;
use anyhow::Result;
use prometheus::{HistogramVec, IntCounterVec};
use std::sync::LazyLock;

static API_REQUESTS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "sddc_controller_api_requests_total",
            "Total number of VMC/CSP API requests by outcome",
        ),
        &["operation", "outcome"],
    )
    .expect("Failed to create API_REQUESTS_TOTAL metric - this should never happen")
});

static API_REQUEST_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        prometheus::HistogramOpts::new(
            "sddc_controller_api_request_duration_seconds",
            "Duration of VMC/CSP API requests in seconds",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0]),
        &["operation"],
    )
    .expect("Failed to create API_REQUEST_DURATION metric - this should never happen")
});

/// Register provider metrics with the registry
pub(crate) fn register_provider_metrics() -> Result<()> {
    REGISTRY.register(Box::new(API_REQUESTS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(API_REQUEST_DURATION.clone()))?;
    Ok(())
}

/// Outcome label for an HTTP status code
pub fn outcome_for_status(status: u16) -> &'static str {
    match status {
        200..=299 => "success",
        400..=499 => "client_error",
        500..=599 => "server_error",
        _ => "unexpected",
    }
}

/// Record one completed (or failed) API request
pub fn record_api_request(operation: &str, outcome: &str, duration: f64) {
    API_REQUESTS_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
    API_REQUEST_DURATION
        .with_label_values(&[operation])
        .observe(duration);
}
