//! # Handler Metrics
//!
//! Metrics for lifecycle invocations: actions, outcomes, submissions and task polls.

use crate::observability::metrics::registry::REGISTRY;
use anyhow::Result;
use prometheus::{Histogram, IntCounterVec};
use std::sync::LazyLock;

static INVOCATIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "sddc_controller_invocations_total",
            "Total number of handler invocations",
        ),
        &["action"],
    )
    .expect("Failed to create INVOCATIONS_TOTAL metric - this should never happen")
});

static OUTCOMES_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "sddc_controller_outcomes_total",
            "Total number of invocation outcomes by status",
        ),
        &["action", "status"],
    )
    .expect("Failed to create OUTCOMES_TOTAL metric - this should never happen")
});

static SUBMISSIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "sddc_controller_submissions_total",
            "Total number of remote operations submitted",
        ),
        &["operation"],
    )
    .expect("Failed to create SUBMISSIONS_TOTAL metric - this should never happen")
});

static TASK_POLLS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "sddc_controller_task_polls_total",
            "Total number of remote task polls by observed phase",
        ),
        &["phase"],
    )
    .expect("Failed to create TASK_POLLS_TOTAL metric - this should never happen")
});

static INVOCATION_DURATION: LazyLock<Histogram> = LazyLock::new(|| {
    Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "sddc_controller_invocation_duration_seconds",
            "Duration of a handler invocation in seconds",
        )
        .buckets(vec![0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0]),
    )
    .expect("Failed to create INVOCATION_DURATION metric - this should never happen")
});

/// Register handler metrics with the registry
pub(crate) fn register_handler_metrics() -> Result<()> {
    REGISTRY.register(Box::new(INVOCATIONS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(OUTCOMES_TOTAL.clone()))?;
    REGISTRY.register(Box::new(SUBMISSIONS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(TASK_POLLS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(INVOCATION_DURATION.clone()))?;
    Ok(())
}

pub fn increment_invocations(action: &str) {
    INVOCATIONS_TOTAL.with_label_values(&[action]).inc();
}

pub fn increment_outcomes(action: &str, status: &str) {
    OUTCOMES_TOTAL.with_label_values(&[action, status]).inc();
}

pub fn increment_submissions(operation: &str) {
    SUBMISSIONS_TOTAL.with_label_values(&[operation]).inc();
}

pub fn increment_task_polls(phase: &str) {
    TASK_POLLS_TOTAL.with_label_values(&[phase]).inc();
}

pub fn observe_invocation_duration(duration: f64) {
    INVOCATION_DURATION.observe(duration);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_invocations() {
        let before = INVOCATIONS_TOTAL.with_label_values(&["create"]).get();
        increment_invocations("create");
        let after = INVOCATIONS_TOTAL.with_label_values(&["create"]).get();
        assert_eq!(after, before + 1u64);
    }

    #[test]
    fn test_increment_outcomes() {
        let before = OUTCOMES_TOTAL
            .with_label_values(&["delete", "FAILED"])
            .get();
        increment_outcomes("delete", "FAILED");
        let after = OUTCOMES_TOTAL
            .with_label_values(&["delete", "FAILED"])
            .get();
        assert_eq!(after, before + 1u64);
    }

    #[test]
    fn test_increment_task_polls() {
        let before = TASK_POLLS_TOTAL.with_label_values(&["READY"]).get();
        increment_task_polls("READY");
        let after = TASK_POLLS_TOTAL.with_label_values(&["READY"]).get();
        assert_eq!(after, before + 1u64);
    }

    #[test]
    fn test_observe_invocation_duration() {
        let before = INVOCATION_DURATION.get_sample_count();
        observe_invocation_duration(0.25);
        assert_eq!(INVOCATION_DURATION.get_sample_count(), before + 1);
    }
}
