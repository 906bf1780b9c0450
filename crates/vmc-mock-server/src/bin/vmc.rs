//! VMC Mock Server
//!
//! Environment Variables:
//! - PORT: Port to listen on (default: 1234)
//! - MOCK_DEPLOYMENT_POLLS: in-progress answers before a deployment finishes (default: 2)
//! - MOCK_DELETE_POLLS: `STARTED` answers before a delete finishes (default: 1)
//! - MOCK_FAIL_DEPLOYMENTS: end deployments in `FAILED` (default: false)
//! - MOCK_VALIDATE_ONLY: answer deployments with 200 `input_validated` (default: false)

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use tracing::info;
use vmc_mock_server::{router, AppState, MockBehavior};

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vmc_mock_server=info,tower_http=info".into()),
        )
        .init();

    let defaults = MockBehavior::default();
    let behavior = MockBehavior {
        deployment_polls: env_or("MOCK_DEPLOYMENT_POLLS", defaults.deployment_polls),
        delete_polls: env_or("MOCK_DELETE_POLLS", defaults.delete_polls),
        fail_deployments: env_or("MOCK_FAIL_DEPLOYMENTS", defaults.fail_deployments),
        validate_only: env_or("MOCK_VALIDATE_ONLY", defaults.validate_only),
        token_lifetime_secs: defaults.token_lifetime_secs,
    };
    info!("VMC mock behaviour: {:?}", behavior);

    let app = router(AppState::new(behavior));
    let port: u16 = env_or("PORT", 1234);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("VMC mock server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("VMC mock server failed")?;

    Ok(())
}
