//! In-memory VMC organization state
//!
//! SDDCs, inventory operations and classic VMC tasks live in a single
//! store behind a tokio `RwLock`. Handlers take the write lock for the
//! whole request so phase transitions are never observed half-applied.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

pub const STATE_DEPLOYING: &str = "DEPLOYING";
pub const STATE_READY: &str = "READY";
pub const STATE_DELETING: &str = "DELETING";
pub const STATE_DELETED: &str = "DELETED";
pub const STATE_FAILED: &str = "FAILED";

/// Tunable behaviour of the mock
#[derive(Debug, Clone)]
pub struct MockBehavior {
    /// Number of in-progress answers a deployment operation gives before its terminal phase
    pub deployment_polls: u32,
    /// Number of `STARTED` answers a delete task gives before `FINISHED`
    pub delete_polls: u32,
    /// Deployments end in `FAILED` instead of `READY`
    pub fail_deployments: bool,
    /// Deployment submissions answer 200 `input_validated` without creating anything
    pub validate_only: bool,
    /// Lifetime reported for issued access tokens
    pub token_lifetime_secs: u64,
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self {
            deployment_polls: 2,
            delete_polls: 1,
            fail_deployments: false,
            validate_only: false,
            token_lifetime_secs: 1799,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SddcRecord {
    pub id: String,
    /// Identifier under `resource_config.sddc_id`, used by PATCH
    pub internal_id: String,
    pub org_id: String,
    pub name: String,
    pub region: String,
    pub vpc_cidr: String,
    pub provider: String,
    pub state: String,
    pub num_hosts: u32,
    pub created: DateTime<Utc>,
}

impl SddcRecord {
    pub fn new(org_id: &str, name: &str, region: &str, vpc_cidr: &str, num_hosts: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            internal_id: uuid::Uuid::new_v4().to_string(),
            org_id: org_id.to_string(),
            name: name.to_string(),
            region: region.to_string(),
            vpc_cidr: vpc_cidr.to_string(),
            provider: "AWS".to_string(),
            state: STATE_DEPLOYING.to_string(),
            num_hosts,
            created: Utc::now(),
        }
    }

    /// VMC representation returned by the SDDC endpoints
    pub fn to_json(&self) -> Value {
        // Management endpoints only exist once the SDDC is up
        let (vc_url, nsx_url) = if self.state == STATE_READY {
            (
                Some(format!("https://vcenter.sddc-{}.vmwarevmc.com/", self.id)),
                Some(format!(
                    "https://nsx-{}.rp.vmwarevmc.com/vmc/reverse-proxy/api/orgs/{}/sddcs/{}/sks-nsxt-manager",
                    self.id, self.org_id, self.id
                )),
            )
        } else {
            (None, None)
        };

        json!({
            "id": self.id,
            "name": self.name,
            "org_id": self.org_id,
            "provider": self.provider,
            "sddc_state": self.state,
            "sddc_type": if self.num_hosts == 1 { "1NODE" } else { "DEFAULT" },
            "created": self.created.to_rfc3339(),
            "resource_config": {
                "sddc_id": self.internal_id,
                "region": self.region,
                "vpc_info": { "vpc_cidr": self.vpc_cidr },
                "vc_url": vc_url,
                "nsx_reverse_proxy_url": nsx_url,
            },
        })
    }
}

/// Inventory deployment operation (`/api/operation/...`)
#[derive(Debug, Clone)]
pub struct OperationRecord {
    pub id: String,
    pub org_id: String,
    pub sddc_id: String,
    /// Classic VMC task mirroring this operation's progress
    pub task_id: String,
    pub polls: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Deploy,
    Delete,
}

/// Classic VMC task (`/vmc/api/orgs/{org}/tasks/{task}`)
#[derive(Debug, Clone)]
pub struct TaskRecord {
    pub id: String,
    pub org_id: String,
    pub sddc_id: String,
    pub kind: TaskKind,
    pub status: String,
    pub polls: u32,
    pub created: DateTime<Utc>,
}

impl TaskRecord {
    pub fn new(org_id: &str, sddc_id: &str, kind: TaskKind) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            org_id: org_id.to_string(),
            sddc_id: sddc_id.to_string(),
            kind,
            status: "STARTED".to_string(),
            polls: 0,
            created: Utc::now(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MockStore {
    pub sddcs: HashMap<String, SddcRecord>,
    pub operations: HashMap<String, OperationRecord>,
    pub tasks: HashMap<String, TaskRecord>,
    pub access_tokens: HashSet<String>,
    /// Request counters keyed by operation name
    pub requests: HashMap<&'static str, u32>,
}

impl MockStore {
    pub fn record_request(&mut self, operation: &'static str) {
        *self.requests.entry(operation).or_insert(0) += 1;
    }
}

/// Shared application state handed to every axum handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<RwLock<MockStore>>,
    pub behavior: Arc<MockBehavior>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(MockBehavior::default())
    }
}

impl AppState {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            store: Arc::new(RwLock::new(MockStore::default())),
            behavior: Arc::new(behavior),
        }
    }

    /// Seed an SDDC directly, bypassing the deployment flow
    pub async fn insert_sddc(
        &self,
        org_id: &str,
        name: &str,
        region: &str,
        vpc_cidr: &str,
        state: &str,
    ) -> String {
        let mut record = SddcRecord::new(org_id, name, region, vpc_cidr, 3);
        record.state = state.to_string();
        let id = record.id.clone();
        self.store.write().await.sddcs.insert(id.clone(), record);
        id
    }

    pub async fn sddc(&self, id: &str) -> Option<SddcRecord> {
        self.store.read().await.sddcs.get(id).cloned()
    }

    /// How many times an operation was requested (see `paths::Operation::as_str`)
    pub async fn request_count(&self, operation: &str) -> u32 {
        self.store
            .read()
            .await
            .requests
            .get(operation)
            .copied()
            .unwrap_or(0)
    }
}
