//! Shared API path definitions for VMware Cloud on AWS and CSP
//!
//! This crate centralizes all API paths to ensure consistency
//! between the controller's REST client and the mock server implementation.
//!
//! ## PathBuilder
//!
//! The `PathBuilder` provides a type-safe, builder-pattern API for constructing
//! API paths with different output formats (axum routes or concrete HTTP paths).
//!
//! ## Route Constants
//!
//! Route constants are provided for Axum routes, which require static string literals.
//! These constants are validated against PathBuilder output in tests.

pub mod vmc;

// Core PathBuilder components
pub mod builder;
pub mod errors;
pub mod formats;
pub mod operations;

// Re-export core types for convenience
pub use builder::PathBuilder;
pub use errors::PathBuilderError;
pub use formats::PathFormat;
pub use operations::{CspOperation, Operation, VmcOperation};
