//! SDDC resource model as seen by the orchestrator.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Credential string that never shows up in logs and is wiped on drop
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}

/// Desired and observed state of a single SDDC
///
/// Field names follow the orchestrator's schema. Unset fields are omitted
/// when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ResourceModel {
    /// CSP API (refresh) token used to obtain access tokens
    #[serde(rename = "AccessToken", skip_serializing_if = "Option::is_none")]
    pub access_token: Option<ApiToken>,

    /// SDDC identifier assigned by VMC
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// AWS region, e.g. `us-west-2`
    #[serde(rename = "Region", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// `SingleAZ` or `MultiAZ`
    #[serde(rename = "DeploymentType", skip_serializing_if = "Option::is_none")]
    pub deployment_type: Option<String>,

    /// Host instance type, e.g. `i3.metal`
    #[serde(rename = "HostType", skip_serializing_if = "Option::is_none")]
    pub host_type: Option<String>,

    #[serde(
        rename = "NumHosts",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_count"
    )]
    #[schemars(with = "Option<u32>")]
    pub num_hosts: Option<u32>,

    /// Cloud provider, `AWS` unless stated otherwise
    #[serde(rename = "Provider", skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    #[serde(rename = "ConnectedAWSAccountID", skip_serializing_if = "Option::is_none")]
    pub connected_aws_account_id: Option<String>,

    #[serde(rename = "ConnectedAWSVPC", skip_serializing_if = "Option::is_none")]
    pub connected_aws_vpc: Option<String>,

    #[serde(
        rename = "ConnectedAWSSubnetID",
        alias = "ConnectedAWSSubnet",
        skip_serializing_if = "Option::is_none"
    )]
    pub connected_aws_subnet_id: Option<String>,

    /// Management network CIDR (the SDDC's VPC CIDR)
    #[serde(rename = "ManagementSubnet", skip_serializing_if = "Option::is_none")]
    pub management_subnet: Option<String>,

    #[serde(rename = "VXLANSubnet", skip_serializing_if = "Option::is_none")]
    pub vxlan_subnet: Option<String>,

    #[serde(rename = "OrgID", skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,

    /// VMC API base URL
    #[serde(rename = "ProdURL", skip_serializing_if = "Option::is_none")]
    pub prod_url: Option<String>,

    /// CSP base URL used for token exchange
    #[serde(rename = "CSPProdURL", skip_serializing_if = "Option::is_none")]
    pub csp_prod_url: Option<String>,

    /// Outstanding deployment operation
    #[serde(rename = "TaskID", skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,

    /// Outstanding delete task
    #[serde(rename = "DeleteTaskID", skip_serializing_if = "Option::is_none")]
    pub delete_task_id: Option<String>,

    #[serde(rename = "vCenterURL", skip_serializing_if = "Option::is_none")]
    pub vcenter_url: Option<String>,

    #[serde(rename = "NSXPublicURL", skip_serializing_if = "Option::is_none")]
    pub nsx_public_url: Option<String>,
}

impl ResourceModel {
    /// Host count as requested, treating a missing value as a single host
    pub fn host_count(&self) -> u32 {
        self.num_hosts.unwrap_or(1)
    }
}

/// Orchestrators often pass numeric properties as strings
fn optional_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(u32),
        Text(String),
    }

    match Option::<Count>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Count::Number(n)) => Ok(Some(n)),
        Some(Count::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Count::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("NumHosts '{s}' is not a number: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_orchestrator_field_names() {
        let model: ResourceModel = serde_json::from_value(json!({
            "AccessToken": "refresh-token",
            "Name": "sddc-a",
            "Region": "us-west-2",
            "NumHosts": "3",
            "ConnectedAWSSubnet": "subnet-1",
            "vCenterURL": "https://vc",
            "OrgID": "org-1"
        }))
        .unwrap();

        assert_eq!(model.num_hosts, Some(3));
        assert_eq!(model.connected_aws_subnet_id.as_deref(), Some("subnet-1"));
        assert_eq!(model.vcenter_url.as_deref(), Some("https://vc"));
        assert_eq!(model.access_token.as_ref().map(ApiToken::expose), Some("refresh-token"));

        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["ConnectedAWSSubnetID"], "subnet-1");
        assert_eq!(value["NumHosts"], 3);
        assert!(value.get("TaskID").is_none());
        assert!(value.get("ID").is_none());
    }

    #[test]
    fn test_invalid_host_count() {
        let result: Result<ResourceModel, _> =
            serde_json::from_value(json!({ "NumHosts": "three" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let model = ResourceModel {
            access_token: Some(ApiToken::new("super-secret")),
            ..ResourceModel::default()
        };
        let rendered = format!("{model:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
