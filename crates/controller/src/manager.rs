//! The manager handle reconcilers are attached to.
//!
//! [`Manager`] is what a [`ReconcilerSetupFn`](crate::ReconcilerSetupFn)
//! receives. [`ControllerManager`](crate::runtime::ControllerManager) is the
//! in-process implementation the operator binary runs.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::ManagerError;

/// A liveness or readiness check. `Err` carries a human-readable reason.
pub type HealthChecker = Arc<dyn Fn() -> Result<(), String> + Send + Sync>;

/// Host capabilities a reconciler setup routine may use.
pub trait Manager {
    /// Register a long-running component. Names must be unique per manager.
    fn add(&mut self, runnable: Arc<dyn Runnable>) -> Result<(), ManagerError>;

    fn add_healthz_check(&mut self, name: &str, check: HealthChecker) -> Result<(), ManagerError>;

    fn add_readyz_check(&mut self, name: &str, check: HealthChecker) -> Result<(), ManagerError>;

    /// Namespace reconcilers should watch. `None` means all namespaces.
    fn namespace(&self) -> Option<&str>;
}

/// A component the manager starts once and stops on shutdown.
#[async_trait]
pub trait Runnable: Send + Sync {
    /// Unique name, used for duplicate detection and logging.
    fn name(&self) -> &str;

    /// Run until `shutdown` fires. Returning early with `Ok` is allowed;
    /// returning `Err` stops the whole manager.
    async fn start(&self, shutdown: ShutdownSignal) -> Result<(), ManagerError>;
}

/// Receiving side of the manager's stop signal. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once shutdown has been requested, or the sender is gone.
    pub async fn wait(&mut self) {
        let _ = self.rx.wait_for(|stopped| *stopped).await;
    }
}

/// Create a stop signal and the sender that triggers it.
pub fn shutdown_channel() -> (watch::Sender<bool>, ShutdownSignal) {
    let (tx, rx) = watch::channel(false);
    (tx, ShutdownSignal { rx })
}

/// Check that always passes.
pub fn ping() -> HealthChecker {
    Arc::new(|| Ok(()))
}
