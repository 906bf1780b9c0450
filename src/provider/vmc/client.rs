//! # VMC Client
//!
//! [`SddcApi`] implementation over the VMC REST API.
//!
//! Every request carries the CSP access token in the `csp-auth-token` header
//! and the configured timeout. Answers are classified by status code:
//! 2xx is decoded, 4xx becomes `ApiError::Rejected` (or `None` for lookups),
//! anything else is `ApiError::Server`.

use super::auth;
use super::requests::DeploymentRequest;
use super::status::{remediation, status_description};
use super::types::{OperationTask, Sddc, SubmitOutcome, VmcTask};
use crate::config::ControllerConfig;
use crate::observability::metrics;
use crate::provider::{ApiError, AuthError, Credentials, OrgScope, SddcApi, Session};
use anyhow::{Context, Result};
use async_trait::async_trait;
use paths::vmc::{AUTH_HEADER, FORCE_DELETE_QUERY};
use paths::{Operation, PathBuilder, PathFormat, VmcOperation};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, field, warn, Instrument};

/// HTTP answer read to completion
struct Answer {
    status: u16,
    body: String,
}

impl Answer {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }
}

#[derive(Debug, Default, Deserialize)]
struct VmcErrorBody {
    #[serde(default)]
    error_messages: Vec<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    id: Option<String>,
    resource_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    id: Option<String>,
}

/// reqwest client for VMC and CSP
#[derive(Debug, Clone)]
pub struct VmcClient {
    http: Client,
}

impl VmcClient {
    /// Build a client whose requests time out after `timeout`
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { http })
    }

    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn from_config(config: &ControllerConfig) -> Result<Self> {
        Self::new(config.request_timeout())
    }

    fn url(
        scope: &OrgScope,
        operation: VmcOperation,
        sddc: Option<&str>,
        task: Option<&str>,
    ) -> Result<String, ApiError> {
        let mut builder = PathBuilder::new()
            .operation(operation)
            .org(scope.org_id.as_str());
        if let Some(sddc) = sddc {
            builder = builder.sddc(sddc);
        }
        if let Some(task) = task {
            builder = builder.task(task);
        }
        let path = builder.build(PathFormat::Http)?;
        Ok(format!("{}{path}", scope.base_url.trim_end_matches('/')))
    }

    /// Send a request, read the body and record span fields and metrics
    async fn execute(
        &self,
        operation: VmcOperation,
        request: RequestBuilder,
        session: &Session,
    ) -> Result<Answer, ApiError> {
        let label = Operation::Vmc(operation).as_str();
        let span = tracing::debug_span!(
            "vmc.api.request",
            operation = label,
            http.status = field::Empty,
            duration_ms = field::Empty
        );
        let span_clone = span.clone();
        let start = Instant::now();

        async move {
            let result = request
                .header(AUTH_HEADER, session.access_token())
                .send()
                .await;
            let response = match result {
                Ok(response) => response,
                Err(source) => {
                    span_clone.record("duration_ms", start.elapsed().as_millis() as u64);
                    metrics::record_api_request(label, "transport", start.elapsed().as_secs_f64());
                    debug!("{} request failed: {}", label, source);
                    return Err(ApiError::Transport {
                        operation: label,
                        source,
                    });
                }
            };

            let status = response.status().as_u16();
            let body = response.text().await.map_err(|source| ApiError::Transport {
                operation: label,
                source,
            })?;

            span_clone.record("http.status", status);
            span_clone.record("duration_ms", start.elapsed().as_millis() as u64);
            metrics::record_api_request(
                label,
                metrics::outcome_for_status(status),
                start.elapsed().as_secs_f64(),
            );
            debug!("{} answered HTTP {}", label, status);

            Ok(Answer { status, body })
        }
        .instrument(span)
        .await
    }
}

/// Error for a non-2xx answer
fn failure(operation: VmcOperation, answer: Answer) -> ApiError {
    let label = Operation::Vmc(operation).as_str();
    if answer.is_client_error() {
        let messages = error_messages(answer.status, &answer.body);
        warn!(
            "{} rejected with HTTP {} ({}): {}",
            label,
            answer.status,
            status_description(answer.status),
            messages.join("; ")
        );
        if let Some(hint) = remediation(answer.status) {
            debug!("{}", hint);
        }
        ApiError::Rejected {
            operation: label,
            status: answer.status,
            messages,
        }
    } else {
        ApiError::Server {
            operation: label,
            status: answer.status,
            body: answer.body,
        }
    }
}

/// `error_messages[]` of a VMC error body, or the status description
fn error_messages(status: u16, body: &str) -> Vec<String> {
    let parsed: VmcErrorBody = serde_json::from_str(body).unwrap_or_default();
    let mut messages = parsed.error_messages;
    if messages.is_empty() {
        if let Some(message) = parsed.message {
            messages.push(message);
        }
    }
    if messages.is_empty() {
        messages.push(status_description(status).to_string());
    }
    messages
}

fn decode<T: DeserializeOwned>(operation: VmcOperation, answer: &Answer) -> Result<T, ApiError> {
    serde_json::from_str(&answer.body).map_err(|e| ApiError::Decode {
        operation: Operation::Vmc(operation).as_str(),
        message: e.to_string(),
    })
}

/// Decode a lookup answer; 4xx means the object is absent
fn lookup<T: DeserializeOwned>(
    operation: VmcOperation,
    answer: Answer,
) -> Result<Option<T>, ApiError> {
    if answer.is_success() {
        decode(operation, &answer).map(Some)
    } else if answer.is_client_error() {
        debug!(
            "{} answered HTTP {}, treating as absent",
            Operation::Vmc(operation),
            answer.status
        );
        Ok(None)
    } else {
        Err(failure(operation, answer))
    }
}

fn required(
    operation: VmcOperation,
    field: &'static str,
    value: Option<String>,
) -> Result<String, ApiError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::MissingField {
            operation: Operation::Vmc(operation).as_str(),
            field,
        })
}

#[async_trait]
impl SddcApi for VmcClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        auth::authorize(&self.http, credentials).await
    }

    async fn submit_create(
        &self,
        session: &Session,
        scope: &OrgScope,
        request: &DeploymentRequest,
    ) -> Result<SubmitOutcome, ApiError> {
        let operation = VmcOperation::SubmitDeployment;
        let url = Self::url(scope, operation, None, None)?;
        let answer = self
            .execute(operation, self.http.post(url).json(request), session)
            .await?;

        match answer.status {
            201 | 202 => {
                let parsed: SubmitResponse = decode(operation, &answer)?;
                Ok(SubmitOutcome::Accepted {
                    task_id: required(operation, "id", parsed.id)?,
                    sddc_id: required(operation, "resource_id", parsed.resource_id)?,
                })
            }
            200 => Ok(SubmitOutcome::Validated),
            _ => Err(failure(operation, answer)),
        }
    }

    async fn fetch_task(
        &self,
        session: &Session,
        scope: &OrgScope,
        task_id: &str,
    ) -> Result<Option<OperationTask>, ApiError> {
        let operation = VmcOperation::GetOperation;
        let url = Self::url(scope, operation, None, Some(task_id))?;
        let answer = self.execute(operation, self.http.get(url), session).await?;
        lookup(operation, answer)
    }

    async fn fetch_task_progress(
        &self,
        session: &Session,
        scope: &OrgScope,
        task_id: &str,
    ) -> Result<Option<VmcTask>, ApiError> {
        let operation = VmcOperation::GetTask;
        let url = Self::url(scope, operation, None, Some(task_id))?;
        let answer = self.execute(operation, self.http.get(url), session).await?;
        lookup(operation, answer)
    }

    async fn fetch_sddc(
        &self,
        session: &Session,
        scope: &OrgScope,
        sddc_id: &str,
    ) -> Result<Option<Sddc>, ApiError> {
        let operation = VmcOperation::GetSddc;
        let url = Self::url(scope, operation, Some(sddc_id), None)?;
        let answer = self.execute(operation, self.http.get(url), session).await?;
        lookup(operation, answer)
    }

    async fn list_sddcs(&self, session: &Session, scope: &OrgScope) -> Result<Vec<Sddc>, ApiError> {
        let operation = VmcOperation::ListSddcs;
        let url = Self::url(scope, operation, None, None)?;
        let answer = self.execute(operation, self.http.get(url), session).await?;
        if answer.is_success() {
            decode(operation, &answer)
        } else {
            Err(failure(operation, answer))
        }
    }

    async fn rename_sddc(
        &self,
        session: &Session,
        scope: &OrgScope,
        internal_sddc_id: &str,
        name: &str,
    ) -> Result<(), ApiError> {
        let operation = VmcOperation::PatchSddc;
        let url = Self::url(scope, operation, Some(internal_sddc_id), None)?;
        let body = serde_json::json!({ "name": name });
        let answer = self
            .execute(operation, self.http.patch(url).json(&body), session)
            .await?;
        if answer.status == 200 {
            Ok(())
        } else if answer.is_success() {
            // Only 200 confirms the rename took effect
            Err(ApiError::Server {
                operation: Operation::Vmc(operation).as_str(),
                status: answer.status,
                body: answer.body,
            })
        } else {
            Err(failure(operation, answer))
        }
    }

    async fn submit_delete(
        &self,
        session: &Session,
        scope: &OrgScope,
        sddc_id: &str,
        force: bool,
    ) -> Result<String, ApiError> {
        let operation = VmcOperation::DeleteSddc;
        let mut url = Self::url(scope, operation, Some(sddc_id), None)?;
        if force {
            url = format!("{url}?{FORCE_DELETE_QUERY}");
        }
        let answer = self
            .execute(operation, self.http.delete(url), session)
            .await?;
        if answer.is_success() {
            let parsed: DeleteResponse = decode(operation, &answer)?;
            required(operation, "id", parsed.id)
        } else {
            Err(failure(operation, answer))
        }
    }

    async fn fetch_delete_task(
        &self,
        session: &Session,
        scope: &OrgScope,
        task_id: &str,
    ) -> Result<Option<VmcTask>, ApiError> {
        let operation = VmcOperation::GetTask;
        let url = Self::url(scope, operation, None, Some(task_id))?;
        let answer = self.execute(operation, self.http.get(url), session).await?;
        lookup(operation, answer)
    }
}
