//! # Progress Reporter
//!
//! Maps an invocation [`Outcome`] to the [`ProgressEvent`] returned to the orchestrator.

use super::error::HandlerError;
use crate::model::{CallbackContext, ProgressEvent, ResourceModel};

/// What a successful invocation hands back
#[derive(Debug, Clone, PartialEq)]
pub enum SuccessPayload {
    Model(ResourceModel),
    Models(Vec<ResourceModel>),
    /// Delete reports no model
    Nothing,
}

/// Result of one invocation
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Not done yet; re-invoke after `delay_seconds` with `context`
    Continue {
        model: ResourceModel,
        context: CallbackContext,
        delay_seconds: u64,
        message: Option<String>,
    },
    Success(SuccessPayload),
    Failed(HandlerError),
}

impl Outcome {
    /// Continuation carrying the in-progress marker
    pub fn poll_again(model: ResourceModel, delay_seconds: u64, message: Option<String>) -> Self {
        Outcome::Continue {
            model,
            context: CallbackContext::in_progress(),
            delay_seconds,
            message,
        }
    }

    pub fn status_label(&self) -> &'static str {
        match self {
            Outcome::Continue { .. } => "IN_PROGRESS",
            Outcome::Success(_) => "SUCCESS",
            Outcome::Failed(_) => "FAILED",
        }
    }
}

impl From<HandlerError> for Outcome {
    fn from(err: HandlerError) -> Self {
        Outcome::Failed(err)
    }
}

impl From<Result<Outcome, HandlerError>> for Outcome {
    fn from(result: Result<Outcome, HandlerError>) -> Self {
        result.unwrap_or_else(Outcome::Failed)
    }
}

impl From<Outcome> for ProgressEvent {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Continue {
                model,
                context,
                delay_seconds,
                message,
            } => ProgressEvent::in_progress(model, context, delay_seconds, message),
            Outcome::Success(SuccessPayload::Model(model)) => ProgressEvent::success(model),
            Outcome::Success(SuccessPayload::Models(models)) => {
                ProgressEvent::success_models(models)
            }
            Outcome::Success(SuccessPayload::Nothing) => ProgressEvent::success_empty(),
            Outcome::Failed(err) => ProgressEvent::failed(err.error_code(), err.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HandlerErrorCode, OperationStatus};

    #[test]
    fn test_continue_event() {
        let event: ProgressEvent = Outcome::poll_again(ResourceModel::default(), 5, None).into();
        assert_eq!(event.status, OperationStatus::InProgress);
        assert_eq!(event.callback_delay_seconds, Some(5));
        assert!(event
            .callback_context
            .as_ref()
            .is_some_and(CallbackContext::is_continuation));
    }

    #[test]
    fn test_failed_event_has_no_context() {
        let event: ProgressEvent =
            Outcome::from(HandlerError::NotFound("SDDC sddc-1 not found".to_string())).into();
        assert_eq!(event.status, OperationStatus::Failed);
        assert_eq!(event.error_code, Some(HandlerErrorCode::NotFound));
        assert_eq!(event.message.as_deref(), Some("SDDC sddc-1 not found"));
        assert!(event.callback_context.is_none());
    }

    #[test]
    fn test_list_event() {
        let models = vec![ResourceModel::default(), ResourceModel::default()];
        let event: ProgressEvent = Outcome::Success(SuccessPayload::Models(models)).into();
        assert_eq!(event.resource_models.map(|m| m.len()), Some(2));
        assert!(event.resource_model.is_none());
    }
}
