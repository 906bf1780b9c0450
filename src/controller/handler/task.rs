//! # Task Status Resolver
//!
//! Collapses the VMC task vocabulary into [`TaskStatus`].
//!
//! Polling never fails an invocation by itself: a lookup error, an absent
//! task, a missing field or an unknown phase all mean "still in progress".

use crate::observability::metrics;
use crate::provider::{OrgScope, SddcApi, Session};
use std::fmt;
use tracing::{debug, warn};

/// Deployment phase reported once the SDDC is usable
pub const PHASE_READY: &str = "READY";
pub const PHASE_FAILED: &str = "FAILED";
/// Delete task status reported once the SDDC is gone
pub const STATUS_FINISHED: &str = "FINISHED";
pub const STATUS_CANCELED: &str = "CANCELED";

/// Progress metrics of a running deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskProgress {
    pub percent: Option<i64>,
    pub remaining_minutes: Option<i64>,
}

impl fmt::Display for TaskProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.percent, self.remaining_minutes) {
            (Some(percent), Some(minutes)) => {
                write!(f, "{percent}% complete, about {minutes} minute(s) remaining")
            }
            (Some(percent), None) => write!(f, "{percent}% complete"),
            (None, Some(minutes)) => write!(f, "about {minutes} minute(s) remaining"),
            (None, None) => f.write_str("in progress"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    InProgress(Option<TaskProgress>),
    Done,
    Failed { phase: String },
}

/// Resolve an inventory deployment operation
///
/// When `with_progress` is set and the operation names its backing VMC task,
/// that task's progress metrics are attached to an in-progress answer.
pub async fn resolve_deployment_task(
    api: &dyn SddcApi,
    session: &Session,
    scope: &OrgScope,
    task_id: &str,
    with_progress: bool,
) -> TaskStatus {
    let task = match api.fetch_task(session, scope, task_id).await {
        Ok(Some(task)) => task,
        Ok(None) => {
            debug!("Deployment task {} not visible yet", task_id);
            metrics::increment_task_polls("absent");
            return TaskStatus::InProgress(None);
        }
        Err(e) => {
            warn!("Failed to look up deployment task {}: {}", task_id, e);
            metrics::increment_task_polls("lookup_error");
            return TaskStatus::InProgress(None);
        }
    };

    let Some(phase) = task.phase() else {
        debug!("Deployment task {} reports no phase", task_id);
        metrics::increment_task_polls("unknown");
        return TaskStatus::InProgress(None);
    };
    metrics::increment_task_polls(phase);
    debug!("Deployment task {} phase: {}", task_id, phase);

    match phase {
        PHASE_READY => TaskStatus::Done,
        PHASE_FAILED => TaskStatus::Failed {
            phase: phase.to_string(),
        },
        _ => {
            let progress = match task.provider_assigned_id.as_deref() {
                Some(vmc_task) if with_progress => {
                    fetch_progress(api, session, scope, vmc_task).await
                }
                _ => None,
            };
            TaskStatus::InProgress(progress)
        }
    }
}

async fn fetch_progress(
    api: &dyn SddcApi,
    session: &Session,
    scope: &OrgScope,
    vmc_task: &str,
) -> Option<TaskProgress> {
    match api.fetch_task_progress(session, scope, vmc_task).await {
        Ok(Some(task)) => {
            let progress = TaskProgress {
                percent: task.progress_percent,
                remaining_minutes: task.estimated_remaining_minutes,
            };
            debug!("VMC task {}: {}", vmc_task, progress);
            Some(progress)
        }
        Ok(None) => None,
        Err(e) => {
            debug!("Could not fetch progress of VMC task {}: {}", vmc_task, e);
            None
        }
    }
}

/// Resolve a VMC delete task
pub async fn resolve_delete_task(
    api: &dyn SddcApi,
    session: &Session,
    scope: &OrgScope,
    task_id: &str,
) -> TaskStatus {
    let task = match api.fetch_delete_task(session, scope, task_id).await {
        Ok(Some(task)) => task,
        Ok(None) => {
            metrics::increment_task_polls("absent");
            return TaskStatus::InProgress(None);
        }
        Err(e) => {
            warn!("Failed to look up delete task {}: {}", task_id, e);
            metrics::increment_task_polls("lookup_error");
            return TaskStatus::InProgress(None);
        }
    };

    let Some(status) = task.status.as_deref() else {
        metrics::increment_task_polls("unknown");
        return TaskStatus::InProgress(None);
    };
    metrics::increment_task_polls(status);
    debug!("Delete task {} status: {}", task_id, status);

    match status {
        STATUS_FINISHED => TaskStatus::Done,
        PHASE_FAILED | STATUS_CANCELED => TaskStatus::Failed {
            phase: status.to_string(),
        },
        _ => TaskStatus::InProgress(None),
    }
}
