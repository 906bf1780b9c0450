//! Create: validate, submit the deployment once, then poll it to `READY`.

use super::{is_continuation, validation, LifecycleHandler};
use crate::controller::error::{describe, HandlerError};
use crate::controller::progress::Outcome;
use crate::model::{CallbackContext, ResourceModel};
use crate::observability::metrics;
use crate::provider::{ApiError, DeploymentRequest, SubmitOutcome};
use tracing::{info, Span};

impl LifecycleHandler {
    /// Create an SDDC, or continue polling one already submitted
    pub async fn create(
        &self,
        desired: ResourceModel,
        context: Option<&CallbackContext>,
    ) -> Outcome {
        if is_continuation(context) {
            return self.poll_create(desired).await;
        }
        Outcome::from(self.submit_create(desired).await)
    }

    async fn submit_create(&self, mut desired: ResourceModel) -> Result<Outcome, HandlerError> {
        validation::validate_desired_state(&desired)?;
        let (scope, mut sessions) = self.open(&desired)?;
        let session = sessions.session(self.api.as_ref()).await?;

        let request = DeploymentRequest::for_model(&desired, self.config());
        info!(
            "Submitting deployment of SDDC '{}' with {} host(s) in {}",
            request.config.name, request.config.host_count, request.config.location.code
        );
        metrics::increment_submissions("create");

        match self.api.submit_create(session, &scope, &request).await {
            Ok(SubmitOutcome::Accepted { task_id, sddc_id }) => {
                Span::current().record("sddc.id", sddc_id.as_str());
                info!("Deployment accepted, SDDC {} tracked by task {}", sddc_id, task_id);
                desired.id = Some(sddc_id);
                desired.task_id = Some(task_id);
                Ok(Outcome::poll_again(desired, self.poll_delay(), None))
            }
            Ok(SubmitOutcome::Validated) => Err(HandlerError::InternalFailure(
                "VMC validated the deployment input but started no deployment task".to_string(),
            )),
            Err(err @ (ApiError::Rejected { .. } | ApiError::Server { .. })) => Err(
                HandlerError::InvalidRequest(describe("SDDC deployment was not accepted", &err)),
            ),
            Err(err) => Err(HandlerError::internal("Failed to submit SDDC deployment", &err)),
        }
    }
}
