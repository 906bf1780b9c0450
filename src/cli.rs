//! # SDDCCTL CLI
//!
//! Command-line interface for the SDDC lifecycle handler.
//!
//! Runs the handler in-process against VMC, the same way the orchestrator
//! would through `POST /v1/handler`.
//!
//! ## Usage
//!
//! ```bash
//! # Submit a deployment and print the IN_PROGRESS event
//! sddcctl invoke --action create --model sddc.yaml
//!
//! # Continue polling with the model and context it returned
//! sddcctl invoke --action create --model returned.json --context context.json
//!
//! # Play the orchestrator: re-invoke until the operation finishes
//! sddcctl invoke --action delete --model sddc.yaml --follow
//!
//! # Print the resource model JSON schema
//! sddcctl schema
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sddc_controller::config::ControllerConfig;
use sddc_controller::model::{Action, CallbackContext, HandlerRequest, OperationStatus, ResourceModel};
use sddc_controller::provider::VmcClient;
use sddc_controller::runtime::{init_tracing, install_crypto_provider};
use sddc_controller::{LifecycleHandler, ProgressEvent};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// SDDC lifecycle handler CLI
#[derive(Parser)]
#[command(name = "sddcctl")]
#[command(about = "VMware Cloud on AWS SDDC lifecycle CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one handler invocation (or a chain of them with --follow)
    Invoke {
        /// Lifecycle action: create, read, update, delete or list
        #[arg(short, long)]
        action: Action,

        /// Resource model file (.json, .yaml or .yml)
        #[arg(short, long)]
        model: PathBuf,

        /// Callback context returned by a previous invocation (JSON)
        #[arg(short, long)]
        context: Option<PathBuf>,

        /// Re-invoke after the suggested delay until the event is terminal
        #[arg(short, long)]
        follow: bool,
    },
    /// Print the resource model JSON schema
    Schema,
}

#[tokio::main]
async fn main() -> Result<()> {
    install_crypto_provider();
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Invoke {
            action,
            model,
            context,
            follow,
        } => invoke_command(action, &model, context.as_deref(), follow).await,
        Commands::Schema => schema_command(),
    }
}

async fn invoke_command(
    action: Action,
    model_path: &Path,
    context_path: Option<&Path>,
    follow: bool,
) -> Result<()> {
    let model = read_model(model_path)?;
    let context = context_path.map(read_context).transpose()?;

    let config = ControllerConfig::from_env();
    let client = VmcClient::from_config(&config)?;
    let handler = LifecycleHandler::new(Arc::new(client), Arc::new(config));

    let mut request = HandlerRequest::new(action, model).with_callback_context(context);
    loop {
        let event = handler.handle(request.clone()).await;
        print_event(&event)?;

        if !follow || event.is_terminal() {
            return finish(&event);
        }

        let delay = event.callback_delay_seconds.unwrap_or(0);
        eprintln!("{} in progress, polling again in {}s...", action, delay);
        tokio::time::sleep(Duration::from_secs(delay)).await;

        // The orchestrator hands back the returned model and context
        if let Some(model) = event.resource_model {
            request.desired_resource_state = model;
        }
        request.callback_context = event.callback_context;
    }
}

fn finish(event: &ProgressEvent) -> Result<()> {
    match event.status {
        OperationStatus::Failed => Err(anyhow::anyhow!(
            "{}: {}",
            event
                .error_code
                .map_or("Failed", |code| code.as_str()),
            event.message.as_deref().unwrap_or("no message")
        )),
        _ => Ok(()),
    }
}

fn print_event(event: &ProgressEvent) -> Result<()> {
    let json = serde_json::to_string_pretty(event).context("Failed to serialize progress event")?;
    println!("{json}");
    Ok(())
}

fn read_model(path: &Path) -> Result<ResourceModel> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read model file {}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML model {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON model {}", path.display()))
    }
}

fn read_context(path: &Path) -> Result<CallbackContext> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read context file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse callback context {}", path.display()))
}

fn schema_command() -> Result<()> {
    let schema = schemars::schema_for!(ResourceModel);
    let json = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;
    println!("{json}");
    Ok(())
}
