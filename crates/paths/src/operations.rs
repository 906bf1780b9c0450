//! API operations known to the path builder.

use std::fmt;

/// VMware Cloud on AWS operations used by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VmcOperation {
    /// `POST /api/inventory/{org}/vmc-aws/operations`
    SubmitDeployment,
    /// `GET /api/operation/{org}/core/operations/{task}`
    GetOperation,
    /// `GET /vmc/api/orgs/{org}/tasks/{task}`
    GetTask,
    /// `GET /vmc/api/orgs/{org}/sddcs`
    ListSddcs,
    /// `GET /vmc/api/orgs/{org}/sddcs/{sddc}`
    GetSddc,
    /// `PATCH /vmc/api/orgs/{org}/sddcs/{sddc}`
    PatchSddc,
    /// `DELETE /vmc/api/orgs/{org}/sddcs/{sddc}/`
    DeleteSddc,
}

/// VMware Cloud Services Platform (CSP) operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CspOperation {
    /// `POST /csp/gateway/am/api/auth/api-tokens/authorize`
    AuthorizeApiToken,
}

/// Any operation the builder can produce a path for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Vmc(VmcOperation),
    Csp(CspOperation),
}

impl From<VmcOperation> for Operation {
    fn from(op: VmcOperation) -> Self {
        Operation::Vmc(op)
    }
}

impl From<CspOperation> for Operation {
    fn from(op: CspOperation) -> Self {
        Operation::Csp(op)
    }
}

impl Operation {
    /// Path template with `{org}`, `{sddc}` and `{task}` placeholders
    pub(crate) fn template(self) -> &'static str {
        use crate::vmc::routes;
        match self {
            Operation::Vmc(VmcOperation::SubmitDeployment) => routes::SUBMIT_DEPLOYMENT,
            Operation::Vmc(VmcOperation::GetOperation) => routes::GET_OPERATION,
            Operation::Vmc(VmcOperation::GetTask) => routes::GET_TASK,
            Operation::Vmc(VmcOperation::ListSddcs) => routes::LIST_SDDCS,
            Operation::Vmc(VmcOperation::GetSddc | VmcOperation::PatchSddc) => routes::SDDC,
            Operation::Vmc(VmcOperation::DeleteSddc) => routes::DELETE_SDDC,
            Operation::Csp(CspOperation::AuthorizeApiToken) => routes::AUTHORIZE_API_TOKEN,
        }
    }

    /// Short name used in logs and metrics labels
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Vmc(VmcOperation::SubmitDeployment) => "submit_deployment",
            Operation::Vmc(VmcOperation::GetOperation) => "get_operation",
            Operation::Vmc(VmcOperation::GetTask) => "get_task",
            Operation::Vmc(VmcOperation::ListSddcs) => "list_sddcs",
            Operation::Vmc(VmcOperation::GetSddc) => "get_sddc",
            Operation::Vmc(VmcOperation::PatchSddc) => "patch_sddc",
            Operation::Vmc(VmcOperation::DeleteSddc) => "delete_sddc",
            Operation::Csp(CspOperation::AuthorizeApiToken) => "authorize_api_token",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
