//! # VMC Deployment Request
//!
//! Payload for `POST /api/inventory/{org}/vmc-aws/operations`.
//!
//! A single-host SDDC is deployed as `OneNode` without a linked AWS
//! account. Anything larger is a `Default` SDDC and must carry
//! `account_link_config`.

use crate::config::ControllerConfig;
use crate::constants::{DEFAULT_DEPLOYMENT_TYPE, DEFAULT_PROVIDER};
use crate::model::ResourceModel;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentRequest {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub resource_type: &'static str,
    pub config: DeploymentConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SddcType {
    OneNode,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentConfig {
    pub provider_type: String,
    pub name: String,
    pub sddc_type: SddcType,
    pub deployment_type: String,
    #[serde(rename = "type")]
    pub config_type: &'static str,
    pub skip_creating_vxlan: bool,
    pub vxlan_subnet: Option<String>,
    pub host_count: u32,
    pub sddc_size: String,
    pub location: Location,
    pub host_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_link_config: Option<AccountLinkConfig>,
    pub network_config: NetworkConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountLinkConfig {
    pub aws_account_id: Option<String>,
    pub subnet_id: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkConfig {
    pub cidr_block: String,
}

impl DeploymentRequest {
    /// Build the deployment payload for a (validated) desired state
    pub fn for_model(model: &ResourceModel, config: &ControllerConfig) -> Self {
        let host_count = model.host_count();
        let region = model.region.clone().unwrap_or_default();

        let (sddc_type, account_link_config) = if host_count == 1 {
            (SddcType::OneNode, None)
        } else {
            (
                SddcType::Default,
                Some(AccountLinkConfig {
                    aws_account_id: model.connected_aws_account_id.clone(),
                    subnet_id: model.connected_aws_subnet_id.iter().cloned().collect(),
                }),
            )
        };

        Self {
            kind: "DEPLOY",
            resource_type: "deployment",
            config: DeploymentConfig {
                provider_type: model
                    .provider
                    .clone()
                    .unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
                name: model.name.clone().unwrap_or_default(),
                sddc_type,
                deployment_type: model
                    .deployment_type
                    .clone()
                    .unwrap_or_else(|| DEFAULT_DEPLOYMENT_TYPE.to_string()),
                config_type: "DeployVmcAwsSddcConfig",
                skip_creating_vxlan: config.skip_creating_vxlan,
                vxlan_subnet: model.vxlan_subnet.clone(),
                host_count,
                sddc_size: config.sddc_size.clone(),
                location: Location {
                    name: region.clone(),
                    code: region,
                },
                host_type: model.host_type.clone(),
                account_link_config,
                network_config: NetworkConfig {
                    cidr_block: model.management_subnet.clone().unwrap_or_default(),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model(hosts: u32) -> ResourceModel {
        ResourceModel {
            name: Some("sddc-a".to_string()),
            region: Some("us-west-2".to_string()),
            num_hosts: Some(hosts),
            host_type: Some("i3.metal".to_string()),
            management_subnet: Some("10.2.0.0/16".to_string()),
            connected_aws_account_id: Some("123456789012".to_string()),
            connected_aws_subnet_id: Some("subnet-0abc".to_string()),
            ..ResourceModel::default()
        }
    }

    #[test]
    fn test_single_host_payload() {
        let request = DeploymentRequest::for_model(&model(1), &ControllerConfig::default());
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["type"], "DEPLOY");
        assert_eq!(value["resource_type"], "deployment");
        let config = &value["config"];
        assert_eq!(config["sddc_type"], "OneNode");
        assert_eq!(config["deployment_type"], "SingleAZ");
        assert_eq!(config["type"], "DeployVmcAwsSddcConfig");
        assert_eq!(config["provider_type"], "AWS");
        assert_eq!(config["host_count"], 1);
        assert_eq!(config["sddc_size"], "medium");
        assert_eq!(config["skip_creating_vxlan"], false);
        assert_eq!(config["vxlan_subnet"], serde_json::Value::Null);
        assert_eq!(config["location"], json!({ "name": "us-west-2", "code": "us-west-2" }));
        assert_eq!(config["network_config"], json!({ "cidr_block": "10.2.0.0/16" }));
        assert!(config.get("account_link_config").is_none());
    }

    #[test]
    fn test_multi_host_payload() {
        let request = DeploymentRequest::for_model(&model(3), &ControllerConfig::default());
        let value = serde_json::to_value(&request).unwrap();

        let config = &value["config"];
        assert_eq!(config["sddc_type"], "Default");
        assert_eq!(config["host_count"], 3);
        assert_eq!(
            config["account_link_config"],
            json!({ "aws_account_id": "123456789012", "subnet_id": ["subnet-0abc"] })
        );
    }

    #[test]
    fn test_configured_knobs() {
        let config = ControllerConfig {
            sddc_size: "large".to_string(),
            skip_creating_vxlan: true,
            ..ControllerConfig::default()
        };
        let request = DeploymentRequest::for_model(&model(1), &config);
        assert_eq!(request.config.sddc_size, "large");
        assert!(request.config.skip_creating_vxlan);
    }
}
