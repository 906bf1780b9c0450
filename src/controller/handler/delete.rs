//! Delete: confirm the SDDC exists, submit the deletion once, then poll it.

use super::{is_continuation, read, LifecycleHandler};
use crate::controller::error::{describe, HandlerError};
use crate::controller::progress::Outcome;
use crate::model::{CallbackContext, ResourceModel};
use crate::observability::metrics;
use crate::provider::ApiError;
use tracing::{info, warn};

impl LifecycleHandler {
    /// Delete an SDDC, or continue polling a deletion already submitted
    pub async fn delete(
        &self,
        desired: ResourceModel,
        context: Option<&CallbackContext>,
    ) -> Outcome {
        if is_continuation(context) {
            return self.poll_delete(desired).await;
        }
        Outcome::from(self.submit_delete(desired).await)
    }

    async fn submit_delete(&self, mut desired: ResourceModel) -> Result<Outcome, HandlerError> {
        let sddc_id = read::required_id(&desired)?.to_string();
        let (scope, mut sessions) = self.open(&desired)?;
        let session = sessions.session(self.api.as_ref()).await?;

        read::find_live_sddc(self.api.as_ref(), session, &scope, &sddc_id).await?;

        let force = self.config.force_delete;
        info!("Submitting deletion of SDDC {} (force: {})", sddc_id, force);
        metrics::increment_submissions("delete");

        let session = sessions.session(self.api.as_ref()).await?;
        match self.api.submit_delete(session, &scope, &sddc_id, force).await {
            Ok(task_id) => {
                info!("Deletion of SDDC {} tracked by task {}", sddc_id, task_id);
                desired.delete_task_id = Some(task_id);
                Ok(Outcome::poll_again(desired, self.poll_delay(), None))
            }
            Err(err @ ApiError::Rejected { status: 404, .. }) => {
                warn!("SDDC {} vanished before deletion", sddc_id);
                Err(HandlerError::NotFound(describe(
                    &format!("SDDC {sddc_id} not found"),
                    &err,
                )))
            }
            Err(err @ ApiError::Rejected { .. }) => Err(HandlerError::InvalidRequest(describe(
                &format!("Deletion of SDDC {sddc_id} was not accepted"),
                &err,
            ))),
            Err(err) => Err(HandlerError::internal(
                &format!("Failed to delete SDDC {sddc_id}"),
                &err,
            )),
        }
    }
}
