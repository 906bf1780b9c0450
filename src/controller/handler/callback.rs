//! Continuations of Create and Delete.
//!
//! A continuation never resubmits. It authenticates, resolves the task named
//! by the model and either answers `IN_PROGRESS` again or terminates. A
//! rejected credential ends the operation; an unreachable CSP does not.

use super::task::{self, TaskStatus};
use super::LifecycleHandler;
use crate::controller::error::HandlerError;
use crate::controller::progress::{Outcome, SuccessPayload};
use crate::model::ResourceModel;
use tracing::{info, warn};

impl LifecycleHandler {
    pub(super) async fn poll_create(&self, mut model: ResourceModel) -> Outcome {
        let Some(task_id) = model.task_id.clone() else {
            return HandlerError::InternalFailure(
                "Create continuation carries no TaskID".to_string(),
            )
            .into();
        };

        let (scope, mut sessions) = match self.open(&model) {
            Ok(opened) => opened,
            Err(err) => return err.into(),
        };
        let session = match sessions.session(self.api.as_ref()).await {
            Ok(session) => session,
            Err(err) if err.is_transient() => {
                warn!("CSP unavailable while polling, will retry: {}", err);
                return Outcome::poll_again(model, self.poll_delay(), None);
            }
            Err(err) => return HandlerError::from(err).into(),
        };

        let status = task::resolve_deployment_task(
            self.api.as_ref(),
            session,
            &scope,
            &task_id,
            self.config.retrieve_task_progress,
        )
        .await;

        match status {
            TaskStatus::Done => {
                info!("Deployment task {} is READY", task_id);
                model.task_id = None;
                Outcome::Success(SuccessPayload::Model(model))
            }
            TaskStatus::Failed { phase } => HandlerError::InternalFailure(format!(
                "SDDC deployment task {task_id} ended in phase {phase}"
            ))
            .into(),
            TaskStatus::InProgress(progress) => Outcome::poll_again(
                model,
                self.poll_delay(),
                progress.map(|p| p.to_string()),
            ),
        }
    }

    pub(super) async fn poll_delete(&self, model: ResourceModel) -> Outcome {
        let Some(task_id) = model.delete_task_id.clone() else {
            return HandlerError::InternalFailure(
                "Delete continuation carries no DeleteTaskID".to_string(),
            )
            .into();
        };

        let (scope, mut sessions) = match self.open(&model) {
            Ok(opened) => opened,
            Err(err) => return err.into(),
        };
        let session = match sessions.session(self.api.as_ref()).await {
            Ok(session) => session,
            Err(err) if err.is_transient() => {
                warn!("CSP unavailable while polling, will retry: {}", err);
                return Outcome::poll_again(model, self.poll_delay(), None);
            }
            Err(err) => return HandlerError::from(err).into(),
        };

        match task::resolve_delete_task(self.api.as_ref(), session, &scope, &task_id).await {
            TaskStatus::Done => {
                info!("Delete task {} FINISHED", task_id);
                Outcome::Success(SuccessPayload::Nothing)
            }
            TaskStatus::Failed { phase } => HandlerError::InternalFailure(format!(
                "SDDC delete task {task_id} ended in status {phase}"
            ))
            .into(),
            TaskStatus::InProgress(_) => Outcome::poll_again(model, self.poll_delay(), None),
        }
    }
}
