//! Handler integration tests against the VMC mock server
//!
//! - `lifecycle`: the happy path from deployment to deletion
//! - `edge_cases`: rejected credentials, failed deployments, soft-deleted SDDCs

pub mod common;
pub mod edge_cases;
pub mod lifecycle;
