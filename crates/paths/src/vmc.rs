//! VMware Cloud on AWS and CSP route constants
//!
//! Placeholders use axum 0.8 syntax (`{org}`), so these strings can be
//! registered directly as routes in the mock server.

pub mod routes {
    /// Submit an SDDC deployment (create)
    pub const SUBMIT_DEPLOYMENT: &str = "/api/inventory/{org}/vmc-aws/operations";
    /// Inventory operation detail, carries `state.phase`
    pub const GET_OPERATION: &str = "/api/operation/{org}/core/operations/{task}";
    /// Classic VMC task, carries `status` and progress metrics
    pub const GET_TASK: &str = "/vmc/api/orgs/{org}/tasks/{task}";
    /// All SDDCs in the organization
    pub const LIST_SDDCS: &str = "/vmc/api/orgs/{org}/sddcs";
    /// A single SDDC (GET and PATCH)
    pub const SDDC: &str = "/vmc/api/orgs/{org}/sddcs/{sddc}";
    /// SDDC deletion, the API expects the trailing slash
    pub const DELETE_SDDC: &str = "/vmc/api/orgs/{org}/sddcs/{sddc}/";
    /// Exchange a CSP API (refresh) token for an access token
    pub const AUTHORIZE_API_TOKEN: &str = "/csp/gateway/am/api/auth/api-tokens/authorize";
}

/// Header carrying the CSP access token on every VMC request
pub const AUTH_HEADER: &str = "csp-auth-token";

/// Query parameter forcing SDDC deletion
pub const FORCE_DELETE_QUERY: &str = "force=true";
