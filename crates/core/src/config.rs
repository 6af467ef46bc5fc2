use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_bool(profile: &str, key: &str, default: bool) -> bool {
    match profiled_env_opt(profile, key) {
        Some(v) => matches!(v.to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
        None => default,
    }
}

pub const PROFILE_ENV: &str = "TRAINING_OPERATOR_PROFILE";
pub const HEALTH_PROBE_BIND_ADDRESS: &str = "HEALTH_PROBE_BIND_ADDRESS";
pub const NAMESPACE: &str = "KUBEFLOW_NAMESPACE";
pub const ENABLE_GANG_SCHEDULING: &str = "ENABLE_GANG_SCHEDULING";
pub const SHUTDOWN_TIMEOUT_SECS: &str = "SHUTDOWN_TIMEOUT_SECS";

const DEFAULT_HEALTH_PROBE_BIND_ADDRESS: &str = "0.0.0.0:8081";
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 10;

// ── Operator config ───────────────────────────────────────────

/// Process-level settings for the operator, read from the environment.
///
/// Command-line flags are applied on top of this by the binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorConfig {
    /// Active profile name (empty = default).
    pub profile: String,
    /// Address the /healthz and /readyz endpoints bind to.
    pub health_probe_bind_address: String,
    /// Namespace to watch for training jobs. `None` watches all namespaces.
    pub namespace: Option<String>,
    pub enable_gang_scheduling: bool,
    pub shutdown_timeout_secs: u64,
}

impl OperatorConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `TRAINING_OPERATOR_PROFILE`. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or(PROFILE_ENV, "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            health_probe_bind_address: profiled_env_or(
                p,
                HEALTH_PROBE_BIND_ADDRESS,
                DEFAULT_HEALTH_PROBE_BIND_ADDRESS,
            ),
            namespace: profiled_env_opt(p, NAMESPACE),
            enable_gang_scheduling: profiled_env_bool(p, ENABLE_GANG_SCHEDULING, false),
            shutdown_timeout_secs: profiled_env_u64(
                p,
                SHUTDOWN_TIMEOUT_SECS,
                DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            ),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Check values that env parsing cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.health_probe_addr()?;
        if self.shutdown_timeout_secs == 0 {
            return Err(ConfigError::ZeroDuration {
                key: SHUTDOWN_TIMEOUT_SECS,
            });
        }
        Ok(())
    }

    pub fn health_probe_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.health_probe_bind_address
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidBindAddress {
                key: HEALTH_PROBE_BIND_ADDRESS,
                address: self.health_probe_bind_address.clone(),
                reason: e.to_string(),
            })
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  probes:      bind={}", self.health_probe_bind_address);
        tracing::info!(
            "  namespace:   {}",
            self.namespace.as_deref().unwrap_or("(all namespaces)")
        );
        tracing::info!("  gang:        enabled={}", self.enable_gang_scheduling);
        tracing::info!("  shutdown:    timeout={}s", self.shutdown_timeout_secs);
    }

    /// Return a JSON view of the effective settings.
    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "health_probe_bind_address": self.health_probe_bind_address,
            "namespace": self.namespace,
            "enable_gang_scheduling": self.enable_gang_scheduling,
            "shutdown_timeout_secs": self.shutdown_timeout_secs,
        })
    }
}
