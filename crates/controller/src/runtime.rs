//! In-process manager host.
//!
//! [`ControllerManager`] collects runnables and probe checks during setup,
//! then [`start`](ControllerManager::start) runs them until shutdown:
//! 1. **Probe server** serves `/healthz` and `/readyz`
//! 2. **Runnables** each run on their own task
//! 3. **Shutdown** is broadcast to everything, bounded by the shutdown timeout

use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::task::{Id, JoinSet};
use tracing::{error, info, warn};

use training_core::{ConfigError, OperatorConfig};

use crate::error::ManagerError;
use crate::manager::{shutdown_channel, HealthChecker, Manager, Runnable};
use crate::probes::{probe_router, ProbeChecks};

// ── ManagerOptions ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ManagerOptions {
    pub health_probe_addr: SocketAddr,
    /// `None` watches every namespace.
    pub namespace: Option<String>,
    pub shutdown_timeout: Duration,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            health_probe_addr: SocketAddr::from(([0, 0, 0, 0], 8081)),
            namespace: None,
            shutdown_timeout: Duration::from_secs(10),
        }
    }
}

impl ManagerOptions {
    pub fn from_config(config: &OperatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            health_probe_addr: config.health_probe_addr()?,
            namespace: config.namespace.clone(),
            shutdown_timeout: config.shutdown_timeout(),
        })
    }
}

// ── ControllerManager ───────────────────────────────────────────────

pub struct ControllerManager {
    options: ManagerOptions,
    runnables: Vec<Arc<dyn Runnable>>,
    checks: ProbeChecks,
}

impl ControllerManager {
    pub fn new(options: ManagerOptions) -> Self {
        Self {
            options,
            runnables: Vec::new(),
            checks: ProbeChecks::default(),
        }
    }

    /// Names of registered runnables, in registration order.
    pub fn runnable_names(&self) -> Vec<&str> {
        self.runnables.iter().map(|r| r.name()).collect()
    }

    /// Run every registered component until `shutdown` resolves or a
    /// runnable fails.
    pub async fn start<F>(self, shutdown: F) -> Result<(), ManagerError>
    where
        F: Future<Output = ()> + Send,
    {
        let addr = self.options.health_probe_addr;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ManagerError::Bind { addr, source })?;
        info!(addr = %listener.local_addr()?, "serving health probes");

        let (stop_tx, stop) = shutdown_channel();

        let router = probe_router(Arc::new(self.checks));
        let mut probe_stop = stop.clone();
        let probe_handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move { probe_stop.wait().await })
                .await
        });

        let mut tasks = JoinSet::new();
        let mut names: HashMap<Id, String> = HashMap::new();
        for runnable in self.runnables {
            let signal = stop.clone();
            let name = runnable.name().to_string();
            info!(runnable = %name, "starting runnable");
            let handle = tasks.spawn(async move { runnable.start(signal).await });
            names.insert(handle.id(), name);
        }

        tokio::pin!(shutdown);
        let outcome = loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("shutdown requested, stopping manager");
                    break Ok(());
                }
                Some(joined) = tasks.join_next_with_id() => {
                    match joined {
                        Ok((id, Ok(()))) => {
                            info!(runnable = %task_name(&names, id), "runnable exited");
                        }
                        Ok((id, Err(e))) => {
                            let name = task_name(&names, id);
                            error!(runnable = %name, error = %e, "runnable failed");
                            break Err(ManagerError::Runnable { name, reason: e.to_string() });
                        }
                        Err(e) => {
                            let name = task_name(&names, e.id());
                            error!(runnable = %name, error = %e, "runnable task panicked");
                            break Err(ManagerError::Runnable { name, reason: e.to_string() });
                        }
                    }
                }
            }
        };

        let _ = stop_tx.send(true);
        let timeout = self.options.shutdown_timeout;
        let drained = tokio::time::timeout(timeout, async {
            while let Some(joined) = tasks.join_next_with_id().await {
                match joined {
                    Ok((id, Ok(()))) => {
                        info!(runnable = %task_name(&names, id), "runnable stopped");
                    }
                    Ok((id, Err(e))) => warn!(
                        runnable = %task_name(&names, id),
                        error = %e,
                        "runnable returned error during shutdown"
                    ),
                    Err(e) => warn!(
                        runnable = %task_name(&names, e.id()),
                        error = %e,
                        "runnable task panicked during shutdown"
                    ),
                }
            }
        })
        .await;
        if drained.is_err() {
            warn!(timeout = ?timeout, "runnables did not stop in time, aborting");
            tasks.abort_all();
        }

        match tokio::time::timeout(timeout, probe_handle).await {
            Ok(Ok(Ok(()))) => {}
            Ok(Ok(Err(e))) => warn!(error = %e, "probe server exited with error"),
            Ok(Err(e)) => warn!(error = %e, "probe server task panicked"),
            Err(_) => warn!("probe server did not stop in time"),
        }

        info!("manager stopped");
        outcome
    }
}

fn task_name(names: &HashMap<Id, String>, id: Id) -> String {
    names
        .get(&id)
        .cloned()
        .unwrap_or_else(|| format!("task-{id}"))
}

impl Manager for ControllerManager {
    fn add(&mut self, runnable: Arc<dyn Runnable>) -> Result<(), ManagerError> {
        if self.runnables.iter().any(|r| r.name() == runnable.name()) {
            return Err(ManagerError::DuplicateController(runnable.name().to_string()));
        }
        self.runnables.push(runnable);
        Ok(())
    }

    fn add_healthz_check(&mut self, name: &str, check: HealthChecker) -> Result<(), ManagerError> {
        self.checks.healthz.add(name, check)
    }

    fn add_readyz_check(&mut self, name: &str, check: HealthChecker) -> Result<(), ManagerError> {
        self.checks.readyz.add(name, check)
    }

    fn namespace(&self) -> Option<&str> {
        self.options.namespace.as_deref()
    }
}

// ── Tests ────────────────────────────────────────────────────────────
