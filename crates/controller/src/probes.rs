//! `/healthz` and `/readyz` endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use crate::error::ManagerError;
use crate::manager::HealthChecker;

/// Named checks behind one probe endpoint, in registration order.
#[derive(Clone)]
pub struct CheckSet {
    kind: &'static str,
    checks: Vec<(String, HealthChecker)>,
}

impl CheckSet {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            checks: Vec::new(),
        }
    }

    pub fn add(&mut self, name: &str, check: HealthChecker) -> Result<(), ManagerError> {
        if self.checks.iter().any(|(existing, _)| existing == name) {
            return Err(ManagerError::DuplicateCheck {
                kind: self.kind,
                name: name.to_string(),
            });
        }
        self.checks.push((name.to_string(), check));
        Ok(())
    }

    /// Run every check. `Err` holds one `[-]<name> failed: <reason>` line per failure.
    pub fn run(&self) -> Result<(), Vec<String>> {
        let failures: Vec<String> = self
            .checks
            .iter()
            .filter_map(|(name, check)| {
                check()
                    .err()
                    .map(|reason| format!("[-]{name} failed: {reason}"))
            })
            .collect();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(failures)
        }
    }
}

/// Liveness and readiness checks served by the probe endpoint.
#[derive(Clone)]
pub struct ProbeChecks {
    pub healthz: CheckSet,
    pub readyz: CheckSet,
}

impl Default for ProbeChecks {
    fn default() -> Self {
        Self {
            healthz: CheckSet::new("healthz"),
            readyz: CheckSet::new("readyz"),
        }
    }
}

pub fn probe_router(checks: Arc<ProbeChecks>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .with_state(checks)
}

async fn healthz(State(checks): State<Arc<ProbeChecks>>) -> (StatusCode, String) {
    respond(&checks.healthz)
}

async fn readyz(State(checks): State<Arc<ProbeChecks>>) -> (StatusCode, String) {
    respond(&checks.readyz)
}

fn respond(set: &CheckSet) -> (StatusCode, String) {
    match set.run() {
        Ok(()) => (StatusCode::OK, "ok".to_string()),
        Err(failures) => {
            tracing::warn!(probe = set.kind, failed = failures.len(), "probe check failed");
            (StatusCode::INTERNAL_SERVER_ERROR, failures.join("\n"))
        }
    }
}
