//! # Provider
//!
//! Remote operation client for the VMware Cloud on AWS control plane.
//!
//! [`SddcApi`] is the seam between the lifecycle handler and the network:
//! the production implementation is [`vmc::VmcClient`], tests plug in
//! in-memory fakes.
//!
//! Result conventions:
//! - `fetch_*` return `Ok(None)` when VMC answers with a 4xx (the object or
//!   task is absent as far as the caller is concerned).
//! - One-shot calls (`submit_*`, `rename_sddc`, `list_sddcs`) return
//!   `Err(ApiError::Rejected)` for 4xx answers.
//! - 5xx answers and transport failures are `ApiError::Server` /
//!   `ApiError::Transport`, both transient.

mod errors;
mod session;
pub mod vmc;

pub use errors::{ApiError, AuthError};
pub use session::{Credentials, OrgScope, Session};
pub use vmc::{
    DeploymentRequest, OperationTask, Sddc, SubmitOutcome, VmcClient, VmcTask,
};

use async_trait::async_trait;

/// Typed VMC/CSP operations used by the lifecycle handler
#[async_trait]
pub trait SddcApi: Send + Sync {
    /// Exchange the caller's CSP API token for an access token
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    /// Submit an SDDC deployment
    async fn submit_create(
        &self,
        session: &Session,
        scope: &OrgScope,
        request: &DeploymentRequest,
    ) -> Result<SubmitOutcome, ApiError>;

    /// Inventory operation detail for a deployment task
    async fn fetch_task(
        &self,
        session: &Session,
        scope: &OrgScope,
        task_id: &str,
    ) -> Result<Option<OperationTask>, ApiError>;

    /// Progress metrics of the VMC task backing a deployment
    async fn fetch_task_progress(
        &self,
        session: &Session,
        scope: &OrgScope,
        task_id: &str,
    ) -> Result<Option<VmcTask>, ApiError>;

    async fn fetch_sddc(
        &self,
        session: &Session,
        scope: &OrgScope,
        sddc_id: &str,
    ) -> Result<Option<Sddc>, ApiError>;

    async fn list_sddcs(&self, session: &Session, scope: &OrgScope) -> Result<Vec<Sddc>, ApiError>;

    /// Rename an SDDC, addressed by its internal `resource_config.sddc_id`
    async fn rename_sddc(
        &self,
        session: &Session,
        scope: &OrgScope,
        internal_sddc_id: &str,
        name: &str,
    ) -> Result<(), ApiError>;

    /// Submit an SDDC deletion, returning the delete task id
    async fn submit_delete(
        &self,
        session: &Session,
        scope: &OrgScope,
        sddc_id: &str,
        force: bool,
    ) -> Result<String, ApiError>;

    async fn fetch_delete_task(
        &self,
        session: &Session,
        scope: &OrgScope,
        task_id: &str,
    ) -> Result<Option<VmcTask>, ApiError>;
}
