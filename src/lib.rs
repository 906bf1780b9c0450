//! SDDC Controller Library
//!
//! Resource lifecycle handler for VMware Cloud on AWS SDDCs. An orchestrator
//! invokes [`LifecycleHandler::handle`] with a [`HandlerRequest`]; long-running
//! operations answer `IN_PROGRESS` with a continuation token and are polled by
//! re-invocation until they finish.
//!
//! Tests are included in the module files and under `tests/`.

pub mod config;
pub mod constants;
pub mod controller;
pub mod model;
pub mod observability;
pub mod provider;
pub mod runtime;

pub use controller::LifecycleHandler;
pub use model::{HandlerRequest, ProgressEvent, ResourceModel};
