//! # Model Reconciler
//!
//! Translates remote SDDC objects into resource models.
//!
//! Only what VMC reports is copied. Desired-state fields VMC does not echo back
//! (`NumHosts`, `HostType`, linked-account settings ...) stay unset, and the
//! scope/credential pass-through fields come from the request model.

use crate::model::ResourceModel;
use crate::provider::Sddc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("SDDC {sddc} is missing '{field}'")]
pub struct TranslationError {
    pub sddc: String,
    pub field: &'static str,
}

/// Build a model from a remote SDDC
///
/// # Errors
///
/// Returns `TranslationError` if the SDDC lacks `id`, `name`, region or VPC CIDR.
pub fn model_from_sddc(sddc: &Sddc, request: &ResourceModel) -> Result<ResourceModel, TranslationError> {
    let id = sddc.id.clone().ok_or_else(|| TranslationError {
        sddc: "<unknown>".to_string(),
        field: "id",
    })?;
    let missing = |field: &'static str| TranslationError {
        sddc: id.clone(),
        field,
    };

    let name = sddc.name.clone().ok_or_else(|| missing("name"))?;
    let region = sddc.region().ok_or_else(|| missing("resource_config.region"))?;
    let vpc_cidr = sddc
        .vpc_cidr()
        .ok_or_else(|| missing("resource_config.vpc_info.vpc_cidr"))?;

    Ok(ResourceModel {
        id: Some(id.clone()),
        name: Some(name),
        org_id: sddc.org_id.clone().or_else(|| request.org_id.clone()),
        region: Some(region.to_string()),
        management_subnet: Some(vpc_cidr.to_string()),
        provider: sddc.provider.clone(),
        vcenter_url: sddc.vc_url().map(str::to_string),
        nsx_public_url: sddc.nsx_url().map(str::to_string),
        access_token: request.access_token.clone(),
        prod_url: request.prod_url.clone(),
        csp_prod_url: request.csp_prod_url.clone(),
        ..ResourceModel::default()
    })
}

/// Refresh the read-only fields of a caller-supplied model
///
/// Everything the caller supplied is kept; `vCenterURL` and `NSXPublicURL`
/// follow the remote object only when VMC reports them.
pub fn overlay_observed(mut model: ResourceModel, sddc: &Sddc) -> ResourceModel {
    if let Some(url) = sddc.vc_url() {
        model.vcenter_url = Some(url.to_string());
    }
    if let Some(url) = sddc.nsx_url() {
        model.nsx_public_url = Some(url.to_string());
    }
    model
}
