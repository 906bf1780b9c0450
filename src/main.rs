//! # SDDC Controller
//!
//! Serves the SDDC lifecycle handler over HTTP.
//!
//! ## Overview
//!
//! An orchestrator posts a handler request (`create`, `read`, `update`,
//! `delete` or `list` plus the desired resource model) to `POST /v1/handler`
//! and receives a progress event. Deployments and deletions take a long time
//! on VMware Cloud on AWS; they answer `IN_PROGRESS` with a callback context
//! and a suggested delay, and the orchestrator re-invokes until the event is
//! `SUCCESS` or `FAILED`.
//!
//! ## Endpoints
//!
//! - `POST /v1/handler` - lifecycle invocations
//! - `GET /metrics` - Prometheus metrics
//! - `GET /healthz`, `GET /readyz` - probes
//!
//! See the [README.md](../README.md) for configuration.

use anyhow::{Context, Result};
use sddc_controller::runtime::initialization::initialize;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let init_result = initialize().await?;

    init_result
        .server_handle
        .await
        .context("HTTP server task panicked")?;

    info!("SDDC Controller stopped");
    Ok(())
}
