//! # VMware Cloud on AWS
//!
//! reqwest-based client for the VMC inventory, SDDC and task APIs, plus the
//! CSP API-token exchange.

mod auth;
mod client;
mod requests;
pub mod status;
mod types;

pub use client::VmcClient;
pub use requests::{
    AccountLinkConfig, DeploymentConfig, DeploymentRequest, Location, NetworkConfig, SddcType,
};
pub use types::{OperationState, OperationTask, ResourceConfig, Sddc, SubmitOutcome, VmcTask, VpcInfo};
