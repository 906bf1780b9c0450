//! Handler invocation request.

use super::ResourceModel;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Marker value that identifies a poll continuation
const IN_PROGRESS_MARKER: &str = "IN_PROGRESS";

/// Lifecycle action requested by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl Action {
    /// Lowercase name used in logs and metrics labels
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::List => "list",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action '{0}', expected one of create, read, update, delete, list")]
pub struct ParseActionError(String);

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" => Ok(Action::Create),
            "read" => Ok(Action::Read),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            "list" => Ok(Action::List),
            _ => Err(ParseActionError(s.to_string())),
        }
    }
}

/// Opaque continuation token echoed back by the orchestrator
///
/// Only the `status` marker is inspected; any other content is carried as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct CallbackContext(Map<String, Value>);

impl CallbackContext {
    /// Token handed out with every non-terminal answer
    pub fn in_progress() -> Self {
        let mut map = Map::new();
        map.insert(
            "status".to_string(),
            Value::String(IN_PROGRESS_MARKER.to_string()),
        );
        Self(map)
    }

    /// Whether this invocation continues a previously submitted operation
    pub fn is_continuation(&self) -> bool {
        self.0.get("status").and_then(Value::as_str) == Some(IN_PROGRESS_MARKER)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for CallbackContext {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// One handler invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HandlerRequest {
    pub action: Action,

    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "ResourceModel")]
    pub desired_resource_state: ResourceModel,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_resource_state: Option<ResourceModel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_context: Option<CallbackContext>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_request_token: Option<String>,
}

impl HandlerRequest {
    pub fn new(action: Action, desired_resource_state: ResourceModel) -> Self {
        Self {
            action,
            desired_resource_state,
            previous_resource_state: None,
            callback_context: None,
            client_request_token: None,
        }
    }

    #[must_use]
    pub fn with_callback_context(mut self, callback_context: Option<CallbackContext>) -> Self {
        self.callback_context = callback_context;
        self
    }

    /// Whether the continuation marker is present
    pub fn is_continuation(&self) -> bool {
        self.callback_context
            .as_ref()
            .is_some_and(CallbackContext::is_continuation)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_marker_detection() {
        assert!(CallbackContext::in_progress().is_continuation());

        let other: CallbackContext =
            serde_json::from_value(json!({ "status": "SUCCESS" })).unwrap();
        assert!(!other.is_continuation());

        let extra: CallbackContext =
            serde_json::from_value(json!({ "status": "IN_PROGRESS", "attempt": 3 })).unwrap();
        assert!(extra.is_continuation());

        assert!(!CallbackContext::default().is_continuation());
    }

    #[test]
    fn test_request_from_orchestrator_json() {
        let request: HandlerRequest = serde_json::from_value(json!({
            "action": "CREATE",
            "desiredResourceState": { "Name": "sddc-a", "TaskID": "task-1" },
            "callbackContext": null
        }))
        .unwrap();
        assert_eq!(request.action, Action::Create);
        assert_eq!(request.desired_resource_state.name.as_deref(), Some("sddc-a"));
        // A task id alone does not make this a continuation
        assert!(!request.is_continuation());
    }

    #[test]
    fn test_null_desired_state() {
        let request: HandlerRequest = serde_json::from_value(json!({
            "action": "LIST",
            "desiredResourceState": null
        }))
        .unwrap();
        assert_eq!(request.desired_resource_state, ResourceModel::default());
    }

    #[test]
    fn test_action_from_str() {
        assert_eq!("Delete".parse::<Action>().unwrap(), Action::Delete);
        assert!("destroy".parse::<Action>().is_err());
    }
}
