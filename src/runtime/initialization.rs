//! # Initialization
//!
//! Controller initialization logic including rustls setup, tracing, metrics,
//! VMC client creation and server startup.

use crate::config::{self, ServerConfig};
use crate::controller::handler::LifecycleHandler;
use crate::controller::server::{start_server, ServerState};
use crate::observability;
use crate::provider::VmcClient;
use anyhow::{Context, Result};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Everything `main` needs once startup has finished
#[derive(Debug)]
pub struct InitializationResult {
    /// Server state shared with the HTTP handlers
    pub server_state: Arc<ServerState>,
    /// Background task running the HTTP server
    pub server_handle: JoinHandle<()>,
}

/// Install the ring crypto provider for rustls
///
/// Safe to call more than once; later calls keep the provider already installed.
pub fn install_crypto_provider() {
    // Err means a provider is already installed
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Initialise the `tracing` subscriber from `RUST_LOG`
pub fn init_tracing() {
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sddc_controller=info".into()),
        )
        .try_init()
    {
        eprintln!("Tracing subscriber already initialised: {e}");
    }
}

/// Initialize the controller runtime
///
/// This function handles:
/// - rustls crypto provider setup
/// - Tracing subscriber setup
/// - Metrics registration
/// - VMC client and lifecycle handler creation
/// - HTTP server startup
///
/// # Errors
///
/// Returns an error if metrics cannot be registered, the HTTP client cannot be
/// built or the server does not become ready in time.
pub async fn initialize() -> Result<InitializationResult> {
    install_crypto_provider();
    init_tracing();

    info!("Starting SDDC Controller");
    info!(
        "Build info: timestamp={}, datetime={}, git_hash={}",
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_DATETIME"),
        env!("BUILD_GIT_HASH")
    );

    let (controller_config, server_config) = config::load_config();
    info!("Controller configuration: {:?}", controller_config);

    observability::metrics::register_metrics().context("Failed to register metrics")?;

    let client = VmcClient::from_config(&controller_config)?;
    let handler = Arc::new(LifecycleHandler::new(
        Arc::new(client),
        Arc::new(controller_config),
    ));
    let server_state = Arc::new(ServerState::new(handler));

    let server_state_clone = Arc::clone(&server_state);
    let port = server_config.port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port, server_state_clone).await {
            error!("HTTP server error: {:#}", e);
        }
    });

    wait_for_server_ready(&server_state, &server_handle, &server_config).await?;
    info!("Controller initialized, serving handler requests on port {}", port);

    Ok(InitializationResult {
        server_state,
        server_handle,
    })
}

/// Wait for the HTTP server to become ready
async fn wait_for_server_ready(
    server_state: &Arc<ServerState>,
    server_handle: &JoinHandle<()>,
    server_config: &ServerConfig,
) -> Result<()> {
    let startup_timeout = Duration::from_secs(server_config.startup_timeout_secs);
    let poll_interval = Duration::from_millis(server_config.poll_interval_ms);
    let start_time = Instant::now();

    loop {
        if server_handle.is_finished() {
            return Err(anyhow::anyhow!("HTTP server failed to start"));
        }

        if server_state.is_ready.load(Ordering::Relaxed) {
            info!("HTTP server is ready and accepting connections");
            return Ok(());
        }

        if start_time.elapsed() > startup_timeout {
            return Err(anyhow::anyhow!(
                "HTTP server failed to become ready within {} seconds",
                startup_timeout.as_secs()
            ));
        }

        tokio::time::sleep(poll_interval).await;
    }
}
