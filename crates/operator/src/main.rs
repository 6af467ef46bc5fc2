//! training-operator — runs the reconcilers for the enabled training job kinds.
//!
//! # Usage
//!
//! ```bash
//! # Every supported job kind
//! training-operator
//!
//! # Only TFJob and PyTorchJob, with gang scheduling
//! training-operator --enable-scheme tfjob --enable-scheme pytorchjob --enable-gang-scheduling
//! ```

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use training_controller::{ping, setup_reconcilers, ControllerManager, Manager, ManagerOptions};
use training_core::config::{load_dotenv, OperatorConfig};

use crate::cli::CliArgs;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();

    load_dotenv();
    let mut config = OperatorConfig::from_env();
    args.apply_to(&mut config);
    config.log_summary();
    debug!(config = %config.summary(), "effective configuration");

    let options = ManagerOptions::from_config(&config).context("invalid operator configuration")?;
    let schemes = args.enabled_schemes()?;
    info!(schemes = %schemes, "enabled schemes");

    let mut mgr = ControllerManager::new(options);
    setup_reconcilers(&mut mgr, &schemes, config.enable_gang_scheduling)
        .context("unable to create controller")?;

    mgr.add_healthz_check("healthz", ping())
        .context("unable to set up health check")?;
    mgr.add_readyz_check("readyz", ping())
        .context("unable to set up ready check")?;

    info!("starting manager");
    mgr.start(shutdown_signal())
        .await
        .context("problem running manager")?;

    info!("training-operator exited");
    Ok(())
}

/// Wait for SIGINT or SIGTERM (Unix) or Ctrl+C elsewhere.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
            (Ok(mut sigint), Ok(mut sigterm)) => {
                tokio::select! {
                    _ = sigint.recv() => {}
                    _ = sigterm.recv() => {}
                }
            }
            _ => {
                tracing::warn!("failed to register signal handlers, falling back to ctrl_c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
