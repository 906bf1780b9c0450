//! # Resource Model
//!
//! Wire types exchanged with the orchestrator.
//!
//! - [`ResourceModel`] - desired/observed state of one SDDC (PascalCase fields)
//! - [`HandlerRequest`] - one handler invocation
//! - [`ProgressEvent`] - the handler's answer (camelCase fields)

mod progress;
mod request;
mod resource;

pub use progress::{HandlerErrorCode, OperationStatus, ProgressEvent};
pub use request::{Action, CallbackContext, HandlerRequest, ParseActionError};
pub use resource::{ApiToken, ResourceModel};
