//! Route handlers for the mock VMC and CSP APIs

use crate::errors::{csp_error_response, vmc_error_response};
use crate::state::{
    AppState, MockBehavior, MockStore, OperationRecord, SddcRecord, TaskKind, TaskRecord,
    STATE_DELETED, STATE_DELETING, STATE_DEPLOYING, STATE_FAILED, STATE_READY,
};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    Form,
};
use paths::vmc::AUTH_HEADER;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

/// Refresh tokens starting with this prefix are refused by the CSP mock
pub const REJECTED_REFRESH_TOKEN_PREFIX: &str = "invalid";

/// Minutes a deployment task reports per outstanding poll
const MINUTES_PER_POLL: u32 = 30;

#[derive(Debug, Deserialize)]
pub struct AuthorizeForm {
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeploymentRequest {
    #[serde(rename = "type")]
    kind: String,
    resource_type: String,
    config: DeploymentConfig,
}

#[derive(Debug, Deserialize)]
pub struct DeploymentConfig {
    name: String,
    provider_type: String,
    sddc_type: String,
    deployment_type: String,
    host_count: u32,
    location: Location,
    network_config: NetworkConfig,
    #[serde(default)]
    account_link_config: Option<AccountLinkConfig>,
}

#[derive(Debug, Deserialize)]
pub struct Location {
    code: String,
}

#[derive(Debug, Deserialize)]
pub struct NetworkConfig {
    cidr_block: String,
}

#[derive(Debug, Deserialize)]
pub struct AccountLinkConfig {
    aws_account_id: Option<String>,
    #[serde(default)]
    subnet_id: Vec<Option<String>>,
}

#[derive(Debug, Deserialize)]
pub struct PatchSddcRequest {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    force: bool,
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

fn check_token(store: &MockStore, headers: &HeaderMap) -> Result<(), Response> {
    let token = headers.get(AUTH_HEADER).and_then(|v| v.to_str().ok());
    match token {
        Some(token) if store.access_tokens.contains(token) => Ok(()),
        _ => Err(vmc_error_response(
            StatusCode::UNAUTHORIZED,
            "The user is not authorized to use the API",
        )),
    }
}

/// POST /csp/gateway/am/api/auth/api-tokens/authorize
pub async fn authorize(State(state): State<AppState>, Form(form): Form<AuthorizeForm>) -> Response {
    let mut store = state.store.write().await;
    store.record_request("authorize_api_token");

    let Some(refresh_token) = form.refresh_token.filter(|t| !t.is_empty()) else {
        return csp_error_response(
            StatusCode::BAD_REQUEST,
            "invalid_request",
            "refresh_token is required",
        );
    };
    if refresh_token.starts_with(REJECTED_REFRESH_TOKEN_PREFIX) {
        warn!("  Rejecting refresh token");
        return csp_error_response(
            StatusCode::BAD_REQUEST,
            "invalid_grant",
            "invalid_grant: Invalid refresh token",
        );
    }

    let access_token = format!("mock-access-{}", uuid::Uuid::new_v4());
    store.access_tokens.insert(access_token.clone());
    info!("  Issued access token");

    Json(json!({
        "access_token": access_token,
        "expires_in": state.behavior.token_lifetime_secs,
        "token_type": "bearer",
        "scope": "openid",
    }))
    .into_response()
}

fn validate_deployment(request: &DeploymentRequest) -> Result<(), String> {
    if request.kind != "DEPLOY" || request.resource_type != "deployment" {
        return Err(format!(
            "Unsupported operation type '{}' for resource '{}'",
            request.kind, request.resource_type
        ));
    }
    let config = &request.config;
    if config.name.trim().is_empty() {
        return Err("SDDC name must not be empty".to_string());
    }
    if config.provider_type != "AWS" {
        return Err(format!("Unsupported provider '{}'", config.provider_type));
    }
    if !matches!(config.deployment_type.as_str(), "SingleAZ" | "MultiAZ") {
        return Err(format!(
            "Unsupported deployment type '{}'",
            config.deployment_type
        ));
    }
    if config.network_config.cidr_block.is_empty() || config.location.code.is_empty() {
        return Err("Region and management CIDR are required".to_string());
    }
    match (config.host_count, config.sddc_type.as_str()) {
        (0, _) => Err("host_count must be at least 1".to_string()),
        (1, "OneNode") => Ok(()),
        (1, other) => Err(format!("sddc_type '{other}' is invalid for a single host")),
        (_, "Default") => {
            let linked = config.account_link_config.as_ref().is_some_and(|link| {
                link.aws_account_id.as_deref().is_some_and(|id| !id.is_empty())
                    && link.subnet_id.iter().flatten().any(|s| !s.is_empty())
            });
            if linked {
                Ok(())
            } else {
                Err("Multi-host SDDCs require a connected AWS account and subnet".to_string())
            }
        }
        (_, other) => Err(format!("sddc_type '{other}' is invalid for multiple hosts")),
    }
}

/// POST /api/inventory/{org}/vmc-aws/operations
pub async fn submit_deployment(
    State(state): State<AppState>,
    Path(org): Path<String>,
    headers: HeaderMap,
    Json(request): Json<DeploymentRequest>,
) -> Response {
    let mut guard = state.store.write().await;
    let store = &mut *guard;
    store.record_request("submit_deployment");
    if let Err(response) = check_token(store, &headers) {
        return response;
    }

    if let Err(message) = validate_deployment(&request) {
        warn!("  Deployment rejected: {}", message);
        return vmc_error_response(StatusCode::BAD_REQUEST, message);
    }

    if state.behavior.validate_only {
        info!("  Deployment input validated only");
        return (StatusCode::OK, Json(json!({ "input_validated": true }))).into_response();
    }

    let config = request.config;
    let sddc = SddcRecord::new(
        &org,
        &config.name,
        &config.location.code,
        &config.network_config.cidr_block,
        config.host_count,
    );
    let task = TaskRecord::new(&org, &sddc.id, TaskKind::Deploy);
    let operation = OperationRecord {
        id: uuid::Uuid::new_v4().to_string(),
        org_id: org.clone(),
        sddc_id: sddc.id.clone(),
        task_id: task.id.clone(),
        polls: 0,
    };

    info!(
        "  DEPLOY: org={}, sddc={}, operation={}",
        org, sddc.id, operation.id
    );
    let response = json!({
        "id": operation.id,
        "resource_id": sddc.id,
        "resource_type": "deployment",
        "type": "DEPLOY",
    });

    store.sddcs.insert(sddc.id.clone(), sddc);
    store.tasks.insert(task.id.clone(), task);
    store.operations.insert(operation.id.clone(), operation);

    (StatusCode::ACCEPTED, Json(response)).into_response()
}

fn deployment_phase(behavior: &MockBehavior, polls: u32) -> &'static str {
    if polls <= behavior.deployment_polls {
        "IN_PROGRESS"
    } else if behavior.fail_deployments {
        "FAILED"
    } else {
        "READY"
    }
}

/// GET /api/operation/{org}/core/operations/{task}
pub async fn get_operation(
    State(state): State<AppState>,
    Path((org, operation_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let mut guard = state.store.write().await;
    let store = &mut *guard;
    store.record_request("get_operation");
    if let Err(response) = check_token(store, &headers) {
        return response;
    }

    let Some(operation) = store
        .operations
        .get_mut(&operation_id)
        .filter(|op| op.org_id == org)
    else {
        return vmc_error_response(
            StatusCode::NOT_FOUND,
            format!("Operation {operation_id} not found"),
        );
    };
    operation.polls += 1;
    let phase = deployment_phase(&state.behavior, operation.polls);

    if phase != "IN_PROGRESS" {
        let (sddc_state, task_status) = if phase == "READY" {
            (STATE_READY, "FINISHED")
        } else {
            (STATE_FAILED, "FAILED")
        };
        if let Some(sddc) = store
            .sddcs
            .get_mut(&operation.sddc_id)
            .filter(|s| s.state == STATE_DEPLOYING)
        {
            sddc.state = sddc_state.to_string();
        }
        if let Some(task) = store.tasks.get_mut(&operation.task_id) {
            task.status = task_status.to_string();
        }
    }

    Json(json!({
        "id": operation.id,
        "resource_id": operation.sddc_id,
        "provider_assigned_id": operation.task_id,
        "state": {
            "phase": phase,
            "sub_phase": if phase == "IN_PROGRESS" { "DEPLOYING_HOSTS" } else { phase },
        },
    }))
    .into_response()
}

fn task_json(task: &TaskRecord, progress_percent: u32, remaining_minutes: u32) -> Value {
    json!({
        "id": task.id,
        "status": task.status,
        "task_type": match task.kind {
            TaskKind::Deploy => "SDDC-PROVISION",
            TaskKind::Delete => "SDDC-DELETE",
        },
        "resource_type": "sddc",
        "resource_id": task.sddc_id,
        "progress_percent": progress_percent,
        "estimated_remaining_minutes": remaining_minutes,
        "created": task.created.to_rfc3339(),
    })
}

/// GET /vmc/api/orgs/{org}/tasks/{task}
pub async fn get_task(
    State(state): State<AppState>,
    Path((org, task_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let mut guard = state.store.write().await;
    let store = &mut *guard;
    store.record_request("get_task");
    if let Err(response) = check_token(store, &headers) {
        return response;
    }

    let Some(task) = store.tasks.get_mut(&task_id).filter(|t| t.org_id == org) else {
        return vmc_error_response(
            StatusCode::NOT_FOUND,
            "Cannot find the task with given identifier",
        );
    };

    match task.kind {
        TaskKind::Deploy => {
            let polls = store
                .operations
                .values()
                .find(|op| op.task_id == task.id)
                .map_or(0, |op| op.polls);
            let total = state.behavior.deployment_polls + 1;
            let done = polls.min(total);
            Json(task_json(
                task,
                done * 100 / total,
                (total - done) * MINUTES_PER_POLL,
            ))
            .into_response()
        }
        TaskKind::Delete => {
            task.polls += 1;
            if task.status == "STARTED" && task.polls > state.behavior.delete_polls {
                task.status = "FINISHED".to_string();
                if let Some(sddc) = store.sddcs.get_mut(&task.sddc_id) {
                    sddc.state = STATE_DELETED.to_string();
                }
                info!("  DELETE finished: sddc={}", task.sddc_id);
            }
            let finished = task.status == "FINISHED";
            Json(task_json(
                task,
                if finished { 100 } else { 50 },
                u32::from(!finished),
            ))
            .into_response()
        }
    }
}

/// GET /vmc/api/orgs/{org}/sddcs
pub async fn list_sddcs(
    State(state): State<AppState>,
    Path(org): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut store = state.store.write().await;
    store.record_request("list_sddcs");
    if let Err(response) = check_token(&store, &headers) {
        return response;
    }

    let mut sddcs: Vec<&SddcRecord> = store.sddcs.values().filter(|s| s.org_id == org).collect();
    sddcs.sort_by_key(|s| s.created);
    let body: Vec<Value> = sddcs.into_iter().map(SddcRecord::to_json).collect();
    Json(Value::Array(body)).into_response()
}

/// GET /vmc/api/orgs/{org}/sddcs/{sddc}
pub async fn get_sddc(
    State(state): State<AppState>,
    Path((org, sddc_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let mut store = state.store.write().await;
    store.record_request("get_sddc");
    if let Err(response) = check_token(&store, &headers) {
        return response;
    }

    match store.sddcs.get(&sddc_id).filter(|s| s.org_id == org) {
        Some(sddc) => Json(sddc.to_json()).into_response(),
        None => vmc_error_response(
            StatusCode::NOT_FOUND,
            format!("SDDC with identifier {sddc_id} is not found"),
        ),
    }
}

/// PATCH /vmc/api/orgs/{org}/sddcs/{sddc}, addressed by the internal SDDC id
pub async fn patch_sddc(
    State(state): State<AppState>,
    Path((org, internal_id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(request): Json<PatchSddcRequest>,
) -> Response {
    let mut store = state.store.write().await;
    store.record_request("patch_sddc");
    if let Err(response) = check_token(&store, &headers) {
        return response;
    }

    let Some(name) = request.name.filter(|n| !n.trim().is_empty()) else {
        return vmc_error_response(StatusCode::BAD_REQUEST, "name must not be empty");
    };
    let Some(sddc) = store
        .sddcs
        .values_mut()
        .find(|s| s.org_id == org && s.internal_id == internal_id)
    else {
        return vmc_error_response(
            StatusCode::NOT_FOUND,
            format!("SDDC with identifier {internal_id} is not found"),
        );
    };

    info!("  RENAME: sddc={}, {} -> {}", sddc.id, sddc.name, name);
    sddc.name = name;
    Json(sddc.to_json()).into_response()
}

/// DELETE /vmc/api/orgs/{org}/sddcs/{sddc}/
pub async fn delete_sddc(
    State(state): State<AppState>,
    Path((org, sddc_id)): Path<(String, String)>,
    Query(query): Query<DeleteQuery>,
    headers: HeaderMap,
) -> Response {
    let mut guard = state.store.write().await;
    let store = &mut *guard;
    store.record_request("delete_sddc");
    if let Err(response) = check_token(store, &headers) {
        return response;
    }

    let Some(sddc) = store.sddcs.get_mut(&sddc_id).filter(|s| s.org_id == org) else {
        return vmc_error_response(
            StatusCode::NOT_FOUND,
            "Cannot find the SDDC with given identifier",
        );
    };
    if sddc.state == STATE_DELETED || sddc.state == STATE_DELETING {
        return vmc_error_response(
            StatusCode::BAD_REQUEST,
            "The SDDC is not in a state that is valid for deletion",
        );
    }
    if sddc.state == STATE_DEPLOYING && !query.force {
        return vmc_error_response(
            StatusCode::BAD_REQUEST,
            "The SDDC is still deploying, retry with force=true",
        );
    }

    sddc.state = STATE_DELETING.to_string();
    let task = TaskRecord::new(&org, &sddc_id, TaskKind::Delete);
    info!(
        "  DELETE: sddc={}, task={}, force={}",
        sddc_id, task.id, query.force
    );
    let body = task_json(&task, 0, 1);
    store.tasks.insert(task.id.clone(), task);

    (StatusCode::ACCEPTED, Json(body)).into_response()
}
