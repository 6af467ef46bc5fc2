use clap::{ArgAction, Parser};

use training_controller::{EnabledSchemes, SchemeError};
use training_core::OperatorConfig;

/// Training job operator.
///
/// Attaches a reconciler for each enabled job kind to one controller manager
/// and runs it until SIGINT or SIGTERM.
#[derive(Parser, Debug)]
#[command(name = "training-operator", version, about)]
pub struct CliArgs {
    /// Enable a job kind, case insensitive. Repeat to enable several:
    /// --enable-scheme tfjob --enable-scheme pytorchjob.
    /// Supported: TFJob, PyTorchJob, MXJob, XGBoostJob.
    /// When omitted, every supported kind is enabled.
    #[arg(long = "enable-scheme", value_name = "KIND", action = ArgAction::Append)]
    pub enable_scheme: Vec<String>,

    /// Enable every supported job kind.
    #[arg(long, conflicts_with = "enable_scheme")]
    pub enable_all_schemes: bool,

    /// Schedule all replicas of a job atomically (overrides env when set).
    /// `--enable-gang-scheduling` alone means true; pass `=false` to turn it off.
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub enable_gang_scheduling: Option<bool>,

    /// Address for the /healthz and /readyz endpoints (overrides env).
    #[arg(long)]
    pub health_probe_bind_address: Option<String>,

    /// Namespace to watch. Unset watches all namespaces (overrides env).
    #[arg(long)]
    pub namespace: Option<String>,

    /// Seconds to wait for reconcilers to stop (overrides env).
    #[arg(long)]
    pub shutdown_timeout: Option<u64>,
}

impl CliArgs {
    /// Validate the requested kinds, enabling all of them when none are named.
    pub fn enabled_schemes(&self) -> Result<EnabledSchemes<'static>, SchemeError> {
        let mut schemes = EnabledSchemes::new();
        for kind in &self.enable_scheme {
            schemes.set(kind)?;
        }
        if self.enable_all_schemes || schemes.is_empty() {
            schemes.fill_all();
        }
        Ok(schemes)
    }

    /// Apply command-line overrides on top of the env config.
    pub fn apply_to(&self, config: &mut OperatorConfig) {
        if let Some(enabled) = self.enable_gang_scheduling {
            config.enable_gang_scheduling = enabled;
        }
        if let Some(addr) = &self.health_probe_bind_address {
            config.health_probe_bind_address = addr.clone();
        }
        if let Some(ns) = &self.namespace {
            config.namespace = Some(ns.clone()).filter(|ns| !ns.is_empty());
        }
        if let Some(secs) = self.shutdown_timeout {
            config.shutdown_timeout_secs = secs;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        let mut argv = vec!["training-operator"];
        argv.extend_from_slice(args);
        CliArgs::try_parse_from(argv).unwrap()
    }

    fn base_config() -> OperatorConfig {
        OperatorConfig {
            profile: String::new(),
            health_probe_bind_address: "0.0.0.0:8081".into(),
            namespace: Some("kubeflow".into()),
            enable_gang_scheduling: false,
            shutdown_timeout_secs: 10,
        }
    }

    #[test]
    fn repeated_flags_keep_order_and_canonical_case() {
        let args = parse(&["--enable-scheme", "xgboostjob", "--enable-scheme=TFJOB"]);
        let schemes = args.enabled_schemes().unwrap();
        assert_eq!(schemes.to_string(), "XGBoostJob,TFJob");
    }

    #[test]
    fn no_flags_enables_everything() {
        let schemes = parse(&[]).enabled_schemes().unwrap();
        assert_eq!(schemes.len(), 4);
    }

    #[test]
    fn enable_all_flag_fills_selection() {
        let schemes = parse(&["--enable-all-schemes"]).enabled_schemes().unwrap();
        assert_eq!(schemes.len(), 4);
    }

    #[test]
    fn enable_all_conflicts_with_explicit_kinds() {
        let result = CliArgs::try_parse_from([
            "training-operator",
            "--enable-all-schemes",
            "--enable-scheme",
            "tfjob",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_kind_is_reported_verbatim() {
        let err = parse(&["--enable-scheme", "SparkJob"])
            .enabled_schemes()
            .unwrap_err();
        assert_eq!(err.to_string(), "scheme SparkJob is not supported yet");
    }

    #[test]
    fn overrides_replace_env_values() {
        let args = parse(&[
            "--health-probe-bind-address",
            "127.0.0.1:9440",
            "--namespace",
            "",
            "--shutdown-timeout",
            "3",
        ]);
        let mut config = base_config();
        args.apply_to(&mut config);
        assert_eq!(config.health_probe_bind_address, "127.0.0.1:9440");
        assert_eq!(config.namespace, None);
        assert_eq!(config.shutdown_timeout_secs, 3);
    }

    #[test]
    fn absent_overrides_keep_env_values() {
        let args = parse(&[]);
        let mut config = base_config();
        config.enable_gang_scheduling = true;
        args.apply_to(&mut config);
        assert_eq!(config.namespace.as_deref(), Some("kubeflow"));
        assert_eq!(config.shutdown_timeout_secs, 10);
        assert!(config.enable_gang_scheduling);
    }

    #[test]
    fn bare_gang_flag_turns_it_on() {
        let args = parse(&["--enable-gang-scheduling", "--enable-scheme", "tfjob"]);
        let mut config = base_config();
        args.apply_to(&mut config);
        assert!(config.enable_gang_scheduling);
        assert_eq!(args.enable_scheme, vec!["tfjob"]);
    }

    #[test]
    fn gang_flag_can_turn_env_value_off() {
        let args = parse(&["--enable-gang-scheduling=false"]);
        let mut config = base_config();
        config.enable_gang_scheduling = true;
        args.apply_to(&mut config);
        assert!(!config.enable_gang_scheduling);
    }
}
