//! Deployment to deletion against the mock

use super::common::TestEnv;
use sddc_controller::model::{Action, OperationStatus, ProgressEvent, ResourceModel};
use vmc_mock_server::{STATE_DELETED, STATE_READY};

fn last(events: &[ProgressEvent]) -> &ProgressEvent {
    events.last().expect("at least one event")
}

async fn deploy(env: &TestEnv, name: &str, hosts: u32) -> ResourceModel {
    let events = env.drive(Action::Create, env.desired(name, hosts)).await;
    let done = last(&events);
    assert_eq!(done.status, OperationStatus::Success, "event: {done:?}");
    done.resource_model.clone().expect("create returns the model")
}

#[tokio::test]
async fn test_create_polls_until_ready() {
    let env = TestEnv::start().await;

    let events = env.drive(Action::Create, env.desired("sddc-a", 1)).await;

    // Submission, two IN_PROGRESS polls, then READY
    assert_eq!(events.len(), 4);
    assert!(events[..3]
        .iter()
        .all(|e| e.status == OperationStatus::InProgress));
    let done = last(&events);
    assert_eq!(done.status, OperationStatus::Success);

    let model = done.resource_model.as_ref().unwrap();
    let id = model.id.as_deref().expect("create assigns an id");
    assert_eq!(model.task_id, None);
    assert_eq!(
        env.state.sddc(id).await.map(|s| s.state).as_deref(),
        Some(STATE_READY)
    );
    assert_eq!(env.state.request_count("submit_deployment").await, 1);
    assert_eq!(env.state.request_count("get_operation").await, 3);
}

#[tokio::test]
async fn test_create_reports_progress_while_deploying() {
    let env = TestEnv::start().await;

    let events = env.drive(Action::Create, env.desired("sddc-a", 1)).await;

    let message = events[1].message.as_deref().expect("progress message");
    assert!(message.contains("% complete"), "message: {message}");
    assert!(env.state.request_count("get_task").await >= 1);
}

#[tokio::test]
async fn test_multi_host_deployment() {
    let env = TestEnv::start().await;

    let model = deploy(&env, "sddc-big", 3).await;

    let record = env.state.sddc(model.id.as_deref().unwrap()).await.unwrap();
    assert_eq!(record.num_hosts, 3);
}

#[tokio::test]
async fn test_read_update_list_delete() {
    let env = TestEnv::start().await;
    let created = deploy(&env, "sddc-a", 1).await;
    let id = created.id.clone().unwrap();

    let read = env.invoke(Action::Read, env.with_id(&id), None).await;
    assert_eq!(read.status, OperationStatus::Success);
    assert!(read
        .resource_model
        .as_ref()
        .and_then(|m| m.vcenter_url.as_deref())
        .is_some());

    let rename = ResourceModel {
        name: Some("sddc-renamed".to_string()),
        ..env.with_id(&id)
    };
    let updated = env.invoke(Action::Update, rename, None).await;
    assert_eq!(updated.status, OperationStatus::Success, "event: {updated:?}");
    assert_eq!(
        env.state.sddc(&id).await.map(|s| s.name).as_deref(),
        Some("sddc-renamed")
    );

    let listed = env.invoke(Action::List, env.scoped_model(), None).await;
    let models = listed.resource_models.expect("list returns models");
    assert_eq!(models.len(), 1);
    assert_eq!(models[0].id.as_deref(), Some(id.as_str()));
    assert_eq!(models[0].name.as_deref(), Some("sddc-renamed"));
    assert_eq!(models[0].region.as_deref(), Some("US_WEST_2"));
    assert_eq!(models[0].management_subnet.as_deref(), Some("10.2.0.0/16"));

    let events = env.drive(Action::Delete, env.with_id(&id)).await;
    // Submission, one STARTED poll, then FINISHED
    assert_eq!(events.len(), 3);
    let done = last(&events);
    assert_eq!(done.status, OperationStatus::Success);
    assert!(done.resource_model.is_none());
    assert_eq!(
        env.state.sddc(&id).await.map(|s| s.state).as_deref(),
        Some(STATE_DELETED)
    );
    assert_eq!(env.state.request_count("delete_sddc").await, 1);

    let listed = env.invoke(Action::List, env.scoped_model(), None).await;
    assert_eq!(listed.resource_models.map(|m| m.len()), Some(0));
}

#[tokio::test]
async fn test_list_translates_seeded_sddcs() {
    let env = TestEnv::start().await;
    let id = env
        .state
        .insert_sddc(super::common::ORG, "x", "us-east", "10.0.0.0/16", STATE_READY)
        .await;
    env.state
        .insert_sddc("other-org", "y", "us-east", "10.1.0.0/16", STATE_READY)
        .await;

    let listed = env.invoke(Action::List, env.scoped_model(), None).await;

    assert_eq!(listed.status, OperationStatus::Success);
    let models = listed.resource_models.unwrap();
    assert_eq!(models.len(), 1);
    let model = &models[0];
    assert_eq!(model.id.as_deref(), Some(id.as_str()));
    assert_eq!(model.name.as_deref(), Some("x"));
    assert_eq!(model.region.as_deref(), Some("us-east"));
    assert_eq!(model.management_subnet.as_deref(), Some("10.0.0.0/16"));
    assert_eq!(model.num_hosts, None);
    assert_eq!(model.host_type, None);
}
