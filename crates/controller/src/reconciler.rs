//! Per-kind reconcilers and the setup functions the registry points at.
//!
//! Each setup function builds a [`JobReconciler`] from the kind's
//! [`KindDefaults`] and attaches it to the manager. The watch loop and status
//! handling for each kind live outside this crate; the runnable registered
//! here carries the kind's configuration and holds its slot in the manager
//! until shutdown.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use training_core::kind::{
    KindDefaults, MX_JOB_DEFAULTS, PYTORCH_JOB_DEFAULTS, TF_JOB_DEFAULTS, XGBOOST_JOB_DEFAULTS,
};

use crate::error::ManagerError;
use crate::manager::{Manager, Runnable, ShutdownSignal};

pub fn setup_tf_job(
    mgr: &mut dyn Manager,
    enable_gang_scheduling: bool,
) -> Result<(), ManagerError> {
    JobReconciler::new(mgr, TF_JOB_DEFAULTS, enable_gang_scheduling).setup_with_manager(mgr)
}

pub fn setup_pytorch_job(
    mgr: &mut dyn Manager,
    enable_gang_scheduling: bool,
) -> Result<(), ManagerError> {
    JobReconciler::new(mgr, PYTORCH_JOB_DEFAULTS, enable_gang_scheduling).setup_with_manager(mgr)
}

pub fn setup_mx_job(
    mgr: &mut dyn Manager,
    enable_gang_scheduling: bool,
) -> Result<(), ManagerError> {
    JobReconciler::new(mgr, MX_JOB_DEFAULTS, enable_gang_scheduling).setup_with_manager(mgr)
}

pub fn setup_xgboost_job(
    mgr: &mut dyn Manager,
    enable_gang_scheduling: bool,
) -> Result<(), ManagerError> {
    JobReconciler::new(mgr, XGBOOST_JOB_DEFAULTS, enable_gang_scheduling).setup_with_manager(mgr)
}

/// Reconciler for one training job kind.
#[derive(Debug, Clone)]
pub struct JobReconciler {
    defaults: KindDefaults,
    namespace: Option<String>,
    enable_gang_scheduling: bool,
}

impl JobReconciler {
    /// Build a reconciler scoped to the manager's watched namespace.
    pub fn new(mgr: &dyn Manager, defaults: KindDefaults, enable_gang_scheduling: bool) -> Self {
        Self {
            defaults,
            namespace: mgr.namespace().map(str::to_string),
            enable_gang_scheduling,
        }
    }

    /// Register this reconciler with the manager.
    pub fn setup_with_manager(self, mgr: &mut dyn Manager) -> Result<(), ManagerError> {
        mgr.add(Arc::new(self))
    }

    pub fn kind(&self) -> &'static str {
        self.defaults.kind
    }

    pub fn defaults(&self) -> &KindDefaults {
        &self.defaults
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn gang_scheduling_enabled(&self) -> bool {
        self.enable_gang_scheduling
    }
}

#[async_trait]
impl Runnable for JobReconciler {
    fn name(&self) -> &str {
        self.defaults.controller_name
    }

    async fn start(&self, mut shutdown: ShutdownSignal) -> Result<(), ManagerError> {
        info!(
            controller = %self.defaults.controller_name,
            kind = %self.defaults.kind,
            api_version = %self.defaults.api_version(),
            namespace = self.namespace.as_deref().unwrap_or("*"),
            gang_scheduling = self.enable_gang_scheduling,
            container = %self.defaults.container_name,
            port_name = %self.defaults.port_name,
            port = self.defaults.port,
            "reconciler started"
        );
        shutdown.wait().await;
        info!(controller = %self.defaults.controller_name, "reconciler stopped");
        Ok(())
    }
}
