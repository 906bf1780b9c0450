//! # VMC Response Types
//!
//! Response bodies of the VMC inventory and SDDC APIs. Every field is optional:
//! callers decide which ones they require.

use crate::constants::SDDC_STATE_DELETED;
use serde::{Deserialize, Serialize};

/// SDDC as returned by `GET /vmc/api/orgs/{org}/sddcs[/{id}]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sddc {
    pub id: Option<String>,
    pub name: Option<String>,
    pub org_id: Option<String>,
    pub provider: Option<String>,
    pub sddc_state: Option<String>,
    pub resource_config: Option<ResourceConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Internal identifier, the one PATCH expects
    pub sddc_id: Option<String>,
    pub region: Option<String>,
    pub vpc_info: Option<VpcInfo>,
    pub vc_url: Option<String>,
    pub nsx_reverse_proxy_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpcInfo {
    pub vpc_cidr: Option<String>,
}

impl Sddc {
    /// Soft-deleted SDDCs are still returned by VMC but no longer exist
    pub fn is_deleted(&self) -> bool {
        self.sddc_state.as_deref() == Some(SDDC_STATE_DELETED)
    }

    pub fn internal_id(&self) -> Option<&str> {
        self.resource_config.as_ref()?.sddc_id.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.resource_config.as_ref()?.region.as_deref()
    }

    pub fn vpc_cidr(&self) -> Option<&str> {
        self.resource_config.as_ref()?.vpc_info.as_ref()?.vpc_cidr.as_deref()
    }

    pub fn vc_url(&self) -> Option<&str> {
        self.resource_config.as_ref()?.vc_url.as_deref()
    }

    pub fn nsx_url(&self) -> Option<&str> {
        self.resource_config.as_ref()?.nsx_reverse_proxy_url.as_deref()
    }
}

/// Inventory operation, `GET /api/operation/{org}/core/operations/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationTask {
    pub id: Option<String>,
    pub state: Option<OperationState>,
    /// Classic VMC task carrying progress metrics
    pub provider_assigned_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationState {
    pub phase: Option<String>,
    pub sub_phase: Option<String>,
}

impl OperationTask {
    pub fn phase(&self) -> Option<&str> {
        self.state.as_ref()?.phase.as_deref()
    }
}

/// Classic VMC task, `GET /vmc/api/orgs/{org}/tasks/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmcTask {
    pub id: Option<String>,
    pub status: Option<String>,
    pub task_type: Option<String>,
    pub progress_percent: Option<i64>,
    pub estimated_remaining_minutes: Option<i64>,
}

/// Answer to a deployment submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Deployment started; `task_id` is the inventory operation
    Accepted { task_id: String, sddc_id: String },
    /// VMC only validated the input (HTTP 200), nothing is deploying
    Validated,
}
