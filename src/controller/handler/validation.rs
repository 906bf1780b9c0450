//! # Validation
//!
//! Checks a desired state before anything is submitted to VMC.

use crate::controller::error::HandlerError;
use crate::model::ResourceModel;
use regex::Regex;
use std::sync::LazyLock;

static IPV4_CIDR: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^(25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)(\.(25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)){3}/(3[0-2]|[12]?\d)$",
    )
    .ok()
});

/// Whether `value` is an IPv4 CIDR block such as `10.2.0.0/16`
pub fn is_ipv4_cidr(value: &str) -> bool {
    IPV4_CIDR
        .as_ref()
        .is_some_and(|regex| regex.is_match(value.trim()))
}

fn present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Validate the desired state of a Create
///
/// # Errors
///
/// Returns `HandlerError::InvalidRequest` listing every violation found.
pub fn validate_desired_state(model: &ResourceModel) -> Result<(), HandlerError> {
    let mut problems = Vec::new();

    for (field, value) in [
        ("Name", model.name.as_deref()),
        ("Region", model.region.as_deref()),
        ("OrgID", model.org_id.as_deref()),
        ("ProdURL", model.prod_url.as_deref()),
        ("CSPProdURL", model.csp_prod_url.as_deref()),
        ("ManagementSubnet", model.management_subnet.as_deref()),
    ] {
        if !present(value) {
            problems.push(format!("{field} is required"));
        }
    }

    if !model.access_token.as_ref().is_some_and(|t| !t.is_empty()) {
        problems.push("AccessToken is required".to_string());
    }

    if model.num_hosts == Some(0) {
        problems.push("NumHosts must be at least 1".to_string());
    }

    if let Some(subnet) = model.management_subnet.as_deref().filter(|s| !s.trim().is_empty()) {
        if !is_ipv4_cidr(subnet) {
            problems.push(format!("ManagementSubnet '{subnet}' is not an IPv4 CIDR block"));
        }
    }

    if let Some(subnet) = model.vxlan_subnet.as_deref() {
        if !is_ipv4_cidr(subnet) {
            problems.push(format!("VXLANSubnet '{subnet}' is not an IPv4 CIDR block"));
        }
    }

    if model.host_count() > 1 {
        if !present(model.connected_aws_account_id.as_deref()) {
            problems.push("ConnectedAWSAccountID is required for multi-host SDDCs".to_string());
        }
        if !present(model.connected_aws_subnet_id.as_deref()) {
            problems.push("ConnectedAWSSubnetID is required for multi-host SDDCs".to_string());
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(HandlerError::InvalidRequest(format!(
            "Invalid desired state: {}",
            problems.join("; ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ApiToken;

    fn valid() -> ResourceModel {
        ResourceModel {
            name: Some("sddc-a".to_string()),
            region: Some("US_WEST_2".to_string()),
            org_id: Some("org-1".to_string()),
            prod_url: Some("https://vmc.vmware.com".to_string()),
            csp_prod_url: Some("https://console.cloud.vmware.com".to_string()),
            access_token: Some(ApiToken::new("refresh")),
            management_subnet: Some("10.2.0.0/16".to_string()),
            num_hosts: Some(1),
            ..ResourceModel::default()
        }
    }

    #[test]
    fn test_valid_single_host() {
        assert!(validate_desired_state(&valid()).is_ok());
    }

    #[test]
    fn test_cidr_formats() {
        assert!(is_ipv4_cidr("10.0.0.0/16"));
        assert!(is_ipv4_cidr("192.168.1.0/32"));
        assert!(!is_ipv4_cidr("10.0.0.0"));
        assert!(!is_ipv4_cidr("10.0.0.256/16"));
        assert!(!is_ipv4_cidr("10.0.0.0/33"));
        assert!(!is_ipv4_cidr("fd00::/8"));
    }

    #[test]
    fn test_multi_host_requires_linked_account() {
        let model = ResourceModel {
            num_hosts: Some(3),
            ..valid()
        };
        let err = validate_desired_state(&model).unwrap_err();
        assert!(err.message().contains("ConnectedAWSAccountID"));
        assert!(err.message().contains("ConnectedAWSSubnetID"));
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let err = validate_desired_state(&ResourceModel::default()).unwrap_err();
        let message = err.message();
        assert!(message.contains("Name is required"));
        assert!(message.contains("AccessToken is required"));
    }

    #[test]
    fn test_bad_vxlan_subnet() {
        let model = ResourceModel {
            vxlan_subnet: Some("not-a-cidr".to_string()),
            ..valid()
        };
        assert!(matches!(
            validate_desired_state(&model),
            Err(HandlerError::InvalidRequest(_))
        ));
    }
}
