//! Failure paths against the mock

use super::common::{TestEnv, ORG};
use axum::{http::StatusCode, routing::post, Json, Router};
use paths::vmc::routes;
use sddc_controller::config::ControllerConfig;
use sddc_controller::model::{
    Action, ApiToken, CallbackContext, HandlerErrorCode, OperationStatus, ResourceModel,
};
use serde_json::json;
use tokio::net::TcpListener;
use vmc_mock_server::{MockBehavior, STATE_DELETED, STATE_DEPLOYING, STATE_READY};

#[tokio::test]
async fn test_rejected_api_token_is_invalid_credentials() {
    let env = TestEnv::start().await;
    let model = ResourceModel {
        access_token: Some(ApiToken::new("invalid-token")),
        ..env.desired("sddc-a", 1)
    };

    let event = env.invoke(Action::Create, model, None).await;

    assert_eq!(event.status, OperationStatus::Failed);
    assert_eq!(event.error_code, Some(HandlerErrorCode::InvalidCredentials));
    assert_eq!(env.state.request_count("authorize_api_token").await, 1);
    assert_eq!(env.state.request_count("submit_deployment").await, 0);
}

#[tokio::test]
async fn test_failed_deployment_is_internal_failure() {
    let env = TestEnv::with_behavior(MockBehavior {
        deployment_polls: 1,
        fail_deployments: true,
        ..MockBehavior::default()
    })
    .await;

    let events = env.drive(Action::Create, env.desired("sddc-a", 1)).await;

    let done = events.last().unwrap();
    assert_eq!(done.status, OperationStatus::Failed);
    assert_eq!(done.error_code, Some(HandlerErrorCode::InternalFailure));
    assert_eq!(env.state.request_count("submit_deployment").await, 1);
}

#[tokio::test]
async fn test_validation_only_answer_is_internal_failure() {
    let env = TestEnv::with_behavior(MockBehavior {
        validate_only: true,
        ..MockBehavior::default()
    })
    .await;

    let event = env.invoke(Action::Create, env.desired("sddc-a", 1), None).await;

    assert_eq!(event.status, OperationStatus::Failed);
    assert_eq!(event.error_code, Some(HandlerErrorCode::InternalFailure));
}

#[tokio::test]
async fn test_invalid_desired_state_never_reaches_vmc() {
    let env = TestEnv::start().await;
    let model = ResourceModel {
        connected_aws_subnet_id: None,
        ..env.desired("sddc-a", 3)
    };

    let event = env.invoke(Action::Create, model, None).await;

    assert_eq!(event.error_code, Some(HandlerErrorCode::InvalidRequest));
    assert_eq!(env.state.request_count("authorize_api_token").await, 0);
    assert_eq!(env.state.request_count("submit_deployment").await, 0);
}

#[tokio::test]
async fn test_soft_deleted_sddc_is_not_found() {
    let env = TestEnv::start().await;
    let id = env
        .state
        .insert_sddc(ORG, "gone", "us-east", "10.0.0.0/16", STATE_DELETED)
        .await;

    let read = env.invoke(Action::Read, env.with_id(&id), None).await;
    assert_eq!(read.error_code, Some(HandlerErrorCode::NotFound));

    let delete = env.invoke(Action::Delete, env.with_id(&id), None).await;
    assert_eq!(delete.error_code, Some(HandlerErrorCode::NotFound));
    assert_eq!(env.state.request_count("delete_sddc").await, 0);
}

#[tokio::test]
async fn test_update_of_unknown_sddc_is_not_found() {
    let env = TestEnv::start().await;
    let model = ResourceModel {
        name: Some("renamed".to_string()),
        ..env.with_id("does-not-exist")
    };

    let event = env.invoke(Action::Update, model, None).await;

    assert_eq!(event.error_code, Some(HandlerErrorCode::NotFound));
    assert_eq!(env.state.request_count("patch_sddc").await, 0);
}

#[tokio::test]
async fn test_foreign_org_sddc_is_not_found() {
    let env = TestEnv::start().await;
    let id = env
        .state
        .insert_sddc("other-org", "x", "us-east", "10.0.0.0/16", STATE_READY)
        .await;

    let event = env.invoke(Action::Read, env.with_id(&id), None).await;

    assert_eq!(event.error_code, Some(HandlerErrorCode::NotFound));
}

#[tokio::test]
async fn test_deploying_sddc_needs_forced_delete() {
    let env = TestEnv::start().await;
    let id = env
        .state
        .insert_sddc(ORG, "busy", "us-east", "10.0.0.0/16", STATE_DEPLOYING)
        .await;

    let event = env.invoke(Action::Delete, env.with_id(&id), None).await;

    assert_eq!(event.error_code, Some(HandlerErrorCode::InvalidRequest));
    assert_eq!(
        env.state.sddc(&id).await.map(|s| s.state).as_deref(),
        Some(STATE_DEPLOYING)
    );
}

#[tokio::test]
async fn test_forced_delete_of_deploying_sddc() {
    let config = ControllerConfig {
        callback_delay_secs: 0,
        force_delete: true,
        ..ControllerConfig::default()
    };
    let env = TestEnv::with_setup(MockBehavior::default(), config).await;
    let id = env
        .state
        .insert_sddc(ORG, "busy", "us-east", "10.0.0.0/16", STATE_DEPLOYING)
        .await;

    let events = env.drive(Action::Delete, env.with_id(&id)).await;

    assert_eq!(events.last().unwrap().status, OperationStatus::Success);
    assert_eq!(
        env.state.sddc(&id).await.map(|s| s.state).as_deref(),
        Some(STATE_DELETED)
    );
}

/// CSP stand-in that answers every token exchange with the given status
async fn spawn_csp(status: StatusCode) -> (String, tokio::task::JoinHandle<()>) {
    let app = Router::new().route(
        routes::AUTHORIZE_API_TOKEN,
        post(move || async move { (status, Json(json!({ "message": "rate limited" }))) }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), server)
}

#[tokio::test]
async fn test_throttled_csp_keeps_polling() {
    let env = TestEnv::start().await;
    let submitted = env.invoke(Action::Create, env.desired("sddc-a", 1), None).await;
    assert_eq!(submitted.status, OperationStatus::InProgress);

    for status in [StatusCode::TOO_MANY_REQUESTS, StatusCode::REQUEST_TIMEOUT] {
        let (csp_url, csp) = spawn_csp(status).await;
        let model = ResourceModel {
            csp_prod_url: Some(csp_url),
            ..submitted.resource_model.clone().unwrap()
        };

        let polled = env
            .invoke(Action::Create, model, Some(CallbackContext::in_progress()))
            .await;
        csp.abort();

        assert_eq!(polled.status, OperationStatus::InProgress, "HTTP {status}: {polled:?}");
        assert_eq!(polled.error_code, None);
    }
    assert_eq!(env.state.request_count("get_operation").await, 0);
}

#[tokio::test]
async fn test_revoked_token_fails_polling() {
    let env = TestEnv::start().await;
    let submitted = env.invoke(Action::Create, env.desired("sddc-a", 1), None).await;
    let model = ResourceModel {
        access_token: Some(ApiToken::new("invalid-after-revocation")),
        ..submitted.resource_model.unwrap()
    };

    let polled = env.invoke(Action::Create, model, submitted.callback_context).await;

    assert_eq!(polled.error_code, Some(HandlerErrorCode::InvalidCredentials));
    assert_eq!(env.state.request_count("get_operation").await, 0);
}
