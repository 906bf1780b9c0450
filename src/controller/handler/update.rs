//! Update: rename a live SDDC with a single synchronous PATCH.

use super::read::{find_live_sddc, required_id};
use super::{is_continuation, LifecycleHandler};
use crate::controller::error::HandlerError;
use crate::controller::progress::{Outcome, SuccessPayload};
use crate::model::{CallbackContext, ResourceModel};
use crate::observability::metrics;
use tracing::{debug, info};

impl LifecycleHandler {
    /// Apply the desired name to an existing SDDC
    ///
    /// Update completes in one invocation; a continuation is answered with
    /// the model as-is and nothing is resubmitted.
    pub async fn update(
        &self,
        desired: ResourceModel,
        context: Option<&CallbackContext>,
    ) -> Outcome {
        if is_continuation(context) {
            debug!("Update continuation, nothing left to do");
            return Outcome::Success(SuccessPayload::Model(desired));
        }
        Outcome::from(self.rename(desired).await)
    }

    async fn rename(&self, desired: ResourceModel) -> Result<Outcome, HandlerError> {
        let sddc_id = required_id(&desired)?;
        let (scope, mut sessions) = self.open(&desired)?;
        let name = desired
            .name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| HandlerError::InvalidRequest("Name is required".to_string()))?;

        let session = sessions.session(self.api.as_ref()).await?;
        let sddc = find_live_sddc(self.api.as_ref(), session, &scope, sddc_id).await?;
        let internal_id = sddc.internal_id().ok_or_else(|| {
            HandlerError::InternalFailure(format!(
                "SDDC {sddc_id} reports no resource_config.sddc_id to update"
            ))
        })?;

        if sddc.name.as_deref() == Some(name) {
            debug!("SDDC {} already named '{}'", sddc_id, name);
        }
        info!("Renaming SDDC {} to '{}'", sddc_id, name);
        metrics::increment_submissions("update");

        let session = sessions.session(self.api.as_ref()).await?;
        self.api
            .rename_sddc(session, &scope, internal_id, name)
            .await
            .map_err(|err| {
                HandlerError::internal(&format!("Failed to update SDDC {sddc_id}"), &err)
            })?;

        Ok(Outcome::Success(SuccessPayload::Model(desired)))
    }
}
