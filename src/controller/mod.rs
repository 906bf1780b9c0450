//! # Controller
//!
//! Lifecycle state machine, outcome reporting, model translation and the HTTP
//! surface that exposes them.

pub mod error;
pub mod handler;
pub mod progress;
pub mod server;
pub mod translate;

pub use error::HandlerError;
pub use handler::LifecycleHandler;
pub use progress::{Outcome, SuccessPayload};
