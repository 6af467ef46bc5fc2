//! Job kinds served by the operator.
//!
//! Kind names are the canonical, case-sensitive spellings used as keys in the
//! scheme registry. No two of them may be equal under ASCII case folding.

/// API group all training job kinds belong to.
pub const GROUP_NAME: &str = "kubeflow.org";

/// API version of the training job kinds.
pub const GROUP_VERSION: &str = "v1";

pub const TF_JOB_KIND: &str = "TFJob";
pub const PYTORCH_JOB_KIND: &str = "PyTorchJob";
pub const MX_JOB_KIND: &str = "MXJob";
pub const XGBOOST_JOB_KIND: &str = "XGBoostJob";

/// Per-kind defaults a reconciler needs when it is attached to a manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindDefaults {
    pub kind: &'static str,
    /// Name the reconciler registers under in the manager.
    pub controller_name: &'static str,
    /// Container in the replica pod template that runs the framework.
    pub container_name: &'static str,
    pub port_name: &'static str,
    pub port: u16,
}

impl KindDefaults {
    /// `<group>/<version>` string for the kind's API version.
    pub fn api_version(&self) -> String {
        format!("{GROUP_NAME}/{GROUP_VERSION}")
    }
}

pub const TF_JOB_DEFAULTS: KindDefaults = KindDefaults {
    kind: TF_JOB_KIND,
    controller_name: "tfjob-controller",
    container_name: "tensorflow",
    port_name: "tfjob-port",
    port: 2222,
};

pub const PYTORCH_JOB_DEFAULTS: KindDefaults = KindDefaults {
    kind: PYTORCH_JOB_KIND,
    controller_name: "pytorchjob-controller",
    container_name: "pytorch",
    port_name: "pytorchjob-port",
    port: 23456,
};

pub const MX_JOB_DEFAULTS: KindDefaults = KindDefaults {
    kind: MX_JOB_KIND,
    controller_name: "mxjob-controller",
    container_name: "mxnet",
    port_name: "mxjob-port",
    port: 9091,
};

pub const XGBOOST_JOB_DEFAULTS: KindDefaults = KindDefaults {
    kind: XGBOOST_JOB_KIND,
    controller_name: "xgboostjob-controller",
    container_name: "xgboost",
    port_name: "xgboostjob-port",
    port: 9999,
};
