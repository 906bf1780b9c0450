//! # Runtime Module
//!
//! Process startup for the `sddc-controller` binary: TLS provider, tracing,
//! metrics, the VMC client, the lifecycle handler and the HTTP server.

pub mod initialization;

pub use initialization::*;
