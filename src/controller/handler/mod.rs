//! # Lifecycle Handler
//!
//! Drives the SDDC lifecycle one invocation at a time.
//!
//! Create and Delete are asynchronous on the VMC side and follow
//! `FRESH -> SUBMITTED -> POLLING -> DONE | FAILED`:
//!
//! 1. A fresh invocation (no `IN_PROGRESS` marker in the callback context)
//!    authenticates, submits exactly once and answers `IN_PROGRESS` with the
//!    task id recorded in the model.
//! 2. Every continuation resolves the task and answers `IN_PROGRESS` again
//!    until the task reaches a terminal phase.
//!
//! The handler never sleeps: the poll delay is returned to the orchestrator.
//! Read, Update and List complete within a single invocation.

mod callback;
mod create;
mod delete;
mod list;
mod read;
pub mod task;
mod update;
pub mod validation;

use crate::config::{ControllerConfig, SharedControllerConfig};
use crate::controller::error::HandlerError;
use crate::controller::progress::Outcome;
use crate::model::{Action, CallbackContext, HandlerRequest, ProgressEvent, ResourceModel};
use crate::observability::metrics;
use crate::provider::{AuthError, Credentials, OrgScope, SddcApi, Session};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, field, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Stateless lifecycle handler, shared across invocations
pub struct LifecycleHandler {
    api: Arc<dyn SddcApi>,
    config: SharedControllerConfig,
}

impl std::fmt::Debug for LifecycleHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleHandler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LifecycleHandler {
    pub fn new(api: Arc<dyn SddcApi>, config: SharedControllerConfig) -> Self {
        Self { api, config }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Run one invocation and report its progress
    pub async fn handle(&self, request: HandlerRequest) -> ProgressEvent {
        let action = request.action;
        let invocation_id = Uuid::new_v4();
        let span = info_span!(
            "sddc.invocation",
            action = action.as_str(),
            invocation.id = %invocation_id,
            sddc.id = field::Empty
        );
        if let Some(id) = request.desired_resource_state.id.as_deref() {
            span.record("sddc.id", id);
        }

        let start = Instant::now();
        metrics::increment_invocations(action.as_str());

        let outcome = self.dispatch(request).instrument(span.clone()).await;

        metrics::increment_outcomes(action.as_str(), outcome.status_label());
        metrics::observe_invocation_duration(start.elapsed().as_secs_f64());
        span.in_scope(|| match &outcome {
            Outcome::Failed(err) => warn!(
                "{} failed ({}): {}",
                action,
                err.error_code(),
                err.message()
            ),
            Outcome::Continue { .. } => debug!("{} still in progress", action),
            Outcome::Success(_) => info!(
                "{} succeeded in {}ms",
                action,
                start.elapsed().as_millis()
            ),
        });

        outcome.into()
    }

    async fn dispatch(&self, request: HandlerRequest) -> Outcome {
        let HandlerRequest {
            action,
            desired_resource_state,
            callback_context,
            ..
        } = request;
        let context = callback_context.as_ref();

        match action {
            Action::Create => self.create(desired_resource_state, context).await,
            Action::Read => self.read(desired_resource_state).await,
            Action::Update => self.update(desired_resource_state, context).await,
            Action::Delete => self.delete(desired_resource_state, context).await,
            Action::List => self.list(desired_resource_state).await,
        }
    }

    /// Org scope and credentials of a model, validated up front
    fn open(&self, model: &ResourceModel) -> Result<(OrgScope, SessionCache), HandlerError> {
        let scope = OrgScope::from_model(model)
            .map_err(|field| HandlerError::InvalidRequest(format!("{field} is required")))?;
        let credentials = Credentials::from_model(model)?;
        Ok((
            scope,
            SessionCache::new(credentials, self.config.token_refresh_skew()),
        ))
    }

    fn poll_delay(&self) -> u64 {
        self.config.callback_delay_secs
    }
}

fn is_continuation(context: Option<&CallbackContext>) -> bool {
    context.is_some_and(CallbackContext::is_continuation)
}

/// Access token of one invocation, refreshed when it is about to expire
pub(crate) struct SessionCache {
    credentials: Credentials,
    session: Option<Session>,
    skew: Duration,
}

impl SessionCache {
    fn new(credentials: Credentials, skew: Duration) -> Self {
        Self {
            credentials,
            session: None,
            skew,
        }
    }

    async fn session(&mut self, api: &dyn SddcApi) -> Result<&Session, AuthError> {
        let session = match self.session.take() {
            Some(session) if !session.needs_refresh(self.skew) => session,
            _ => {
                debug!("Exchanging CSP API token for an access token");
                api.authenticate(&self.credentials).await?
            }
        };
        Ok(self.session.insert(session))
    }
}
