//! Progress event returned to the orchestrator.

use super::{CallbackContext, ResourceModel};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    InProgress,
    Success,
    Failed,
}

impl OperationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationStatus::InProgress => "IN_PROGRESS",
            OperationStatus::Success => "SUCCESS",
            OperationStatus::Failed => "FAILED",
        }
    }
}

/// Error kinds surfaced on a `FAILED` event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum HandlerErrorCode {
    InvalidCredentials,
    InvalidRequest,
    NotFound,
    InternalFailure,
}

impl HandlerErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            HandlerErrorCode::InvalidCredentials => "InvalidCredentials",
            HandlerErrorCode::InvalidRequest => "InvalidRequest",
            HandlerErrorCode::NotFound => "NotFound",
            HandlerErrorCode::InternalFailure => "InternalFailure",
        }
    }
}

impl fmt::Display for HandlerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub status: OperationStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_model: Option<ResourceModel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_models: Option<Vec<ResourceModel>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<HandlerErrorCode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_context: Option<CallbackContext>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_delay_seconds: Option<u64>,
}

impl ProgressEvent {
    fn empty(status: OperationStatus) -> Self {
        Self {
            status,
            resource_model: None,
            resource_models: None,
            error_code: None,
            message: None,
            callback_context: None,
            callback_delay_seconds: None,
        }
    }

    pub fn in_progress(
        model: ResourceModel,
        callback_context: CallbackContext,
        delay_seconds: u64,
        message: Option<String>,
    ) -> Self {
        Self {
            resource_model: Some(model),
            callback_context: Some(callback_context),
            callback_delay_seconds: Some(delay_seconds),
            message,
            ..Self::empty(OperationStatus::InProgress)
        }
    }

    pub fn success(model: ResourceModel) -> Self {
        Self {
            resource_model: Some(model),
            ..Self::empty(OperationStatus::Success)
        }
    }

    pub fn success_models(models: Vec<ResourceModel>) -> Self {
        Self {
            resource_models: Some(models),
            ..Self::empty(OperationStatus::Success)
        }
    }

    /// Success without a model (Delete)
    pub fn success_empty() -> Self {
        Self::empty(OperationStatus::Success)
    }

    pub fn failed(error_code: HandlerErrorCode, message: impl Into<String>) -> Self {
        Self {
            error_code: Some(error_code),
            message: Some(message.into()),
            ..Self::empty(OperationStatus::Failed)
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status != OperationStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_in_progress_wire_format() {
        let event = ProgressEvent::in_progress(
            ResourceModel::default(),
            CallbackContext::in_progress(),
            5,
            None,
        );
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["status"], "IN_PROGRESS");
        assert_eq!(value["callbackContext"], json!({ "status": "IN_PROGRESS" }));
        assert_eq!(value["callbackDelaySeconds"], 5);
        assert!(value.get("errorCode").is_none());
        assert!(!event.is_terminal());
    }

    #[test]
    fn test_failed_wire_format() {
        let event = ProgressEvent::failed(HandlerErrorCode::NotFound, "gone");
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["status"], "FAILED");
        assert_eq!(value["errorCode"], "NotFound");
        assert_eq!(value["message"], "gone");
        assert!(value.get("callbackContext").is_none());
        assert!(event.is_terminal());
    }

    #[test]
    fn test_delete_success_has_no_model() {
        let value = serde_json::to_value(ProgressEvent::success_empty()).unwrap();
        assert_eq!(value, json!({ "status": "SUCCESS" }));
    }
}
