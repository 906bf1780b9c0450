//! List: every live SDDC of the org, translated into resource models.

use super::LifecycleHandler;
use crate::controller::error::HandlerError;
use crate::controller::progress::{Outcome, SuccessPayload};
use crate::controller::translate;
use crate::model::ResourceModel;
use tracing::{debug, info};

impl LifecycleHandler {
    /// List the SDDCs of the org named by `desired`
    ///
    /// Soft-deleted SDDCs are skipped. Any failure, including one SDDC that
    /// cannot be translated, fails the whole listing.
    pub async fn list(&self, desired: ResourceModel) -> Outcome {
        Outcome::from(self.try_list(&desired).await)
    }

    async fn try_list(&self, desired: &ResourceModel) -> Result<Outcome, HandlerError> {
        let (scope, mut sessions) = self.open(desired)?;
        let session = sessions.session(self.api.as_ref()).await?;

        let sddcs = self
            .api
            .list_sddcs(session, &scope)
            .await
            .map_err(|err| HandlerError::internal("Failed to list SDDCs", &err))?;
        debug!("VMC returned {} SDDC(s) for org {}", sddcs.len(), scope.org_id);

        let models = sddcs
            .iter()
            .filter(|sddc| !sddc.is_deleted())
            .map(|sddc| translate::model_from_sddc(sddc, desired))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| HandlerError::InternalFailure(format!("Failed to list SDDCs: {err}")))?;

        info!("Listed {} SDDC(s) in org {}", models.len(), scope.org_id);
        Ok(Outcome::Success(SuccessPayload::Models(models)))
    }
}
