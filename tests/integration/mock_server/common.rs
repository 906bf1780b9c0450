//! Shared setup: mock server, handler and request helpers

use sddc_controller::config::ControllerConfig;
use sddc_controller::model::{
    Action, ApiToken, CallbackContext, HandlerRequest, OperationStatus, ProgressEvent,
    ResourceModel,
};
use sddc_controller::provider::{SddcApi, VmcClient};
use sddc_controller::runtime::install_crypto_provider;
use sddc_controller::LifecycleHandler;
use std::sync::Arc;
use tokio::net::TcpListener;
use vmc_mock_server::{AppState, MockBehavior};

pub const ORG: &str = "org-mock";

/// A running mock server and a handler pointed at it
pub struct TestEnv {
    pub state: AppState,
    pub base_url: String,
    pub handler: LifecycleHandler,
    server: tokio::task::JoinHandle<()>,
}

impl Drop for TestEnv {
    fn drop(&mut self) {
        self.server.abort();
    }
}

impl TestEnv {
    pub async fn start() -> Self {
        Self::with_behavior(MockBehavior::default()).await
    }

    pub async fn with_behavior(behavior: MockBehavior) -> Self {
        let config = ControllerConfig {
            callback_delay_secs: 0,
            request_timeout_secs: 5,
            ..ControllerConfig::default()
        };
        Self::with_setup(behavior, config).await
    }

    pub async fn with_setup(behavior: MockBehavior, config: ControllerConfig) -> Self {
        install_crypto_provider();

        let state = AppState::new(behavior);
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("Failed to read mock address");
        let app = vmc_mock_server::router(state.clone());
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock server failed");
        });

        let client = VmcClient::new(config.request_timeout()).expect("Failed to build VMC client");
        let api: Arc<dyn SddcApi> = Arc::new(client);
        let handler = LifecycleHandler::new(api, Arc::new(config));

        Self {
            state,
            base_url: format!("http://{addr}"),
            handler,
            server,
        }
    }

    /// Scope and credential fields every request carries
    pub fn scoped_model(&self) -> ResourceModel {
        ResourceModel {
            org_id: Some(ORG.to_string()),
            prod_url: Some(self.base_url.clone()),
            csp_prod_url: Some(self.base_url.clone()),
            access_token: Some(ApiToken::new("test-token")),
            ..ResourceModel::default()
        }
    }

    pub fn desired(&self, name: &str, hosts: u32) -> ResourceModel {
        ResourceModel {
            name: Some(name.to_string()),
            region: Some("US_WEST_2".to_string()),
            num_hosts: Some(hosts),
            host_type: Some("i3.metal".to_string()),
            management_subnet: Some("10.2.0.0/16".to_string()),
            connected_aws_account_id: Some("123456789012".to_string()),
            connected_aws_subnet_id: Some("subnet-0abc".to_string()),
            ..self.scoped_model()
        }
    }

    pub fn with_id(&self, id: &str) -> ResourceModel {
        ResourceModel {
            id: Some(id.to_string()),
            ..self.scoped_model()
        }
    }

    pub async fn invoke(
        &self,
        action: Action,
        model: ResourceModel,
        context: Option<CallbackContext>,
    ) -> ProgressEvent {
        self.handler
            .handle(HandlerRequest::new(action, model).with_callback_context(context))
            .await
    }

    /// Re-invoke until the event is terminal, returning every event seen
    pub async fn drive(&self, action: Action, model: ResourceModel) -> Vec<ProgressEvent> {
        let mut events = Vec::new();
        let mut event = self.invoke(action, model, None).await;
        while event.status == OperationStatus::InProgress {
            assert!(events.len() < 20, "{action} never finished");
            let model = event
                .resource_model
                .clone()
                .expect("in-progress events carry the model");
            let context = event.callback_context.clone();
            events.push(event);
            event = self.invoke(action, model, context).await;
        }
        events.push(event);
        events
    }
}
