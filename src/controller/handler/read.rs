//! Read: one lookup, no continuation.

use super::LifecycleHandler;
use crate::controller::error::HandlerError;
use crate::controller::progress::{Outcome, SuccessPayload};
use crate::controller::translate;
use crate::model::ResourceModel;
use crate::provider::{OrgScope, Sddc, SddcApi, Session};
use tracing::debug;

impl LifecycleHandler {
    /// Report the current state of an SDDC
    ///
    /// Fields VMC does not report are returned as supplied.
    pub async fn read(&self, desired: ResourceModel) -> Outcome {
        Outcome::from(self.try_read(desired).await)
    }

    async fn try_read(&self, desired: ResourceModel) -> Result<Outcome, HandlerError> {
        let sddc_id = required_id(&desired)?;
        let (scope, mut sessions) = self.open(&desired)?;
        let sddc = {
            let session = sessions.session(self.api.as_ref()).await?;
            find_live_sddc(self.api.as_ref(), session, &scope, sddc_id).await?
        };
        debug!("SDDC {} is {:?}", sddc_id, sddc.sddc_state);
        Ok(Outcome::Success(SuccessPayload::Model(
            translate::overlay_observed(desired, &sddc),
        )))
    }
}

pub(super) fn required_id(model: &ResourceModel) -> Result<&str, HandlerError> {
    model
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| HandlerError::NotFound("No SDDC ID in the resource model".to_string()))
}

/// Fetch an SDDC that exists and is not soft-deleted
pub(super) async fn find_live_sddc(
    api: &dyn SddcApi,
    session: &Session,
    scope: &OrgScope,
    sddc_id: &str,
) -> Result<Sddc, HandlerError> {
    match api.fetch_sddc(session, scope, sddc_id).await {
        Ok(Some(sddc)) if sddc.is_deleted() => Err(HandlerError::NotFound(format!(
            "SDDC {sddc_id} was found, but in deleted state"
        ))),
        Ok(Some(sddc)) => Ok(sddc),
        Ok(None) => Err(HandlerError::NotFound(format!("SDDC {sddc_id} not found"))),
        Err(err) => Err(HandlerError::internal(
            &format!("Failed to look up SDDC {sddc_id}"),
            &err,
        )),
    }
}
