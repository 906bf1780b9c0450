//! VMware Cloud on AWS Mock Server
//!
//! A lightweight Axum-based HTTP server that emulates the subset of the VMC
//! and CSP REST APIs the SDDC controller talks to. All state is in memory:
//!
//! - Deployment operations advance one phase per poll and end `READY`
//!   (or `FAILED` when configured to).
//! - Delete tasks end `FINISHED` and leave the SDDC behind as `DELETED`,
//!   the way the real API soft-deletes.
//! - Every VMC route requires a `csp-auth-token` issued by the CSP route.

pub mod errors;
pub mod handlers;
pub mod state;

pub use handlers::REJECTED_REFRESH_TOKEN_PREFIX;
pub use state::{AppState, MockBehavior, STATE_DELETED, STATE_DEPLOYING, STATE_READY};

use axum::{
    routing::{delete, get, post},
    Router,
};
use paths::vmc::routes;
use tower_http::trace::TraceLayer;

/// Build the mock router over the given state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(routes::AUTHORIZE_API_TOKEN, post(handlers::authorize))
        .route(routes::SUBMIT_DEPLOYMENT, post(handlers::submit_deployment))
        .route(routes::GET_OPERATION, get(handlers::get_operation))
        .route(routes::GET_TASK, get(handlers::get_task))
        .route(routes::LIST_SDDCS, get(handlers::list_sddcs))
        .route(
            routes::SDDC,
            get(handlers::get_sddc).patch(handlers::patch_sddc),
        )
        .route(routes::DELETE_SDDC, delete(handlers::delete_sddc))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn access_token(app: &Router) -> String {
        let request = Request::post(routes::AUTHORIZE_API_TOKEN)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("refresh_token=good"))
            .unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        body["access_token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_rejected_refresh_token() {
        let app = router(AppState::default());
        let request = Request::post(routes::AUTHORIZE_API_TOKEN)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("refresh_token=invalid-token"))
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_grant");
    }

    #[tokio::test]
    async fn test_vmc_routes_require_token() {
        let app = router(AppState::default());
        let request = Request::get("/vmc/api/orgs/org-1/sddcs")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["error_messages"].is_array());
    }

    #[tokio::test]
    async fn test_deployment_advances_to_ready() {
        let state = AppState::new(MockBehavior {
            deployment_polls: 1,
            ..MockBehavior::default()
        });
        let app = router(state.clone());
        let token = access_token(&app).await;

        let payload = serde_json::json!({
            "type": "DEPLOY",
            "resource_type": "deployment",
            "config": {
                "name": "sddc-a",
                "provider_type": "AWS",
                "sddc_type": "OneNode",
                "deployment_type": "SingleAZ",
                "host_count": 1,
                "location": { "name": "us-west-2", "code": "us-west-2" },
                "network_config": { "cidr_block": "10.2.0.0/16" }
            }
        });
        let request = Request::post("/api/inventory/org-1/vmc-aws/operations")
            .header("content-type", "application/json")
            .header("csp-auth-token", &token)
            .body(Body::from(payload.to_string()))
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        let operation_id = body["id"].as_str().unwrap().to_string();
        let sddc_id = body["resource_id"].as_str().unwrap().to_string();

        let mut phases = Vec::new();
        for _ in 0..2 {
            let request = Request::get(format!(
                "/api/operation/org-1/core/operations/{operation_id}"
            ))
            .header("csp-auth-token", &token)
            .body(Body::empty())
            .unwrap();
            let (status, body) = send(&app, request).await;
            assert_eq!(status, StatusCode::OK);
            phases.push(body["state"]["phase"].as_str().unwrap().to_string());
        }
        assert_eq!(phases, vec!["IN_PROGRESS", "READY"]);
        assert_eq!(state.sddc(&sddc_id).await.unwrap().state, STATE_READY);
    }

    #[tokio::test]
    async fn test_multi_host_without_account_link_is_rejected() {
        let app = router(AppState::default());
        let token = access_token(&app).await;
        let payload = serde_json::json!({
            "type": "DEPLOY",
            "resource_type": "deployment",
            "config": {
                "name": "sddc-b",
                "provider_type": "AWS",
                "sddc_type": "Default",
                "deployment_type": "SingleAZ",
                "host_count": 3,
                "location": { "name": "us-west-2", "code": "us-west-2" },
                "network_config": { "cidr_block": "10.2.0.0/16" }
            }
        });
        let request = Request::post("/api/inventory/org-1/vmc-aws/operations")
            .header("content-type", "application/json")
            .header("csp-auth-token", &token)
            .body(Body::from(payload.to_string()))
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error_messages"][0]
            .as_str()
            .unwrap()
            .contains("connected AWS account"));
    }

    #[tokio::test]
    async fn test_delete_soft_deletes() {
        let state = AppState::default();
        let app = router(state.clone());
        let token = access_token(&app).await;
        let sddc_id = state
            .insert_sddc("org-1", "x", "us-east-1", "10.0.0.0/16", STATE_READY)
            .await;

        let request = Request::delete(format!("/vmc/api/orgs/org-1/sddcs/{sddc_id}/"))
            .header("csp-auth-token", &token)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        let task_id = body["id"].as_str().unwrap().to_string();

        let mut statuses = Vec::new();
        for _ in 0..2 {
            let request = Request::get(format!("/vmc/api/orgs/org-1/tasks/{task_id}"))
                .header("csp-auth-token", &token)
                .body(Body::empty())
                .unwrap();
            let (_, body) = send(&app, request).await;
            statuses.push(body["status"].as_str().unwrap().to_string());
        }
        assert_eq!(statuses, vec!["STARTED", "FINISHED"]);

        let request = Request::get(format!("/vmc/api/orgs/org-1/sddcs/{sddc_id}"))
            .header("csp-auth-token", &token)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sddc_state"], STATE_DELETED);
    }
}
