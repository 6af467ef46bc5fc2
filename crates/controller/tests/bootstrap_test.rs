//! Integration tests for activating enabled schemes against a live manager.
//!
//! Drives the built-in registry through `ControllerManager`: selection,
//! setup, duplicate handling, and a full start/stop cycle.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::sync::oneshot;

use training_controller::{
    ping, setup_reconcilers, supported_schemes, BootstrapError, ControllerManager,
    EnabledSchemes, Manager, ManagerError, ManagerOptions,
};

const TIMEOUT: Duration = Duration::from_secs(5);

fn local_manager(namespace: Option<&str>) -> ControllerManager {
    ControllerManager::new(ManagerOptions {
        health_probe_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        namespace: namespace.map(str::to_string),
        shutdown_timeout: Duration::from_secs(1),
    })
}

#[test]
fn selected_kinds_register_their_controllers() {
    let mut schemes = EnabledSchemes::new();
    schemes.set("pytorchjob").unwrap();
    schemes.set("TFJOB").unwrap();
    assert_eq!(schemes.to_string(), "PyTorchJob,TFJob");

    let mut mgr = local_manager(Some("kubeflow"));
    setup_reconcilers(&mut mgr, &schemes, true).unwrap();

    assert_eq!(
        mgr.runnable_names(),
        vec!["pytorchjob-controller", "tfjob-controller"]
    );
}

#[test]
fn empty_selection_falls_back_to_every_kind() {
    let mut schemes = EnabledSchemes::new();
    if schemes.is_empty() {
        schemes.fill_all();
    }

    let mut mgr = local_manager(None);
    setup_reconcilers(&mut mgr, &schemes, false).unwrap();

    let mut names = mgr.runnable_names();
    names.sort();
    assert_eq!(
        names,
        vec![
            "mxjob-controller",
            "pytorchjob-controller",
            "tfjob-controller",
            "xgboostjob-controller",
        ]
    );
    assert_eq!(names.len(), supported_schemes().len());
}

#[test]
fn duplicate_selection_fails_on_second_setup() {
    let mut schemes = EnabledSchemes::new();
    schemes.fill_all();
    schemes.set("xgboostjob").unwrap();

    let mut mgr = local_manager(None);
    let err = setup_reconcilers(&mut mgr, &schemes, false).unwrap_err();

    assert!(matches!(
        err,
        BootstrapError::Setup(ManagerError::DuplicateController(_))
    ));
    assert_eq!(
        err.to_string(),
        "controller with name xgboostjob-controller already exists"
    );
    // Everything before the duplicate stays attached.
    assert_eq!(mgr.runnable_names().len(), supported_schemes().len());
}

#[test]
fn unsupported_input_is_rejected_before_setup() {
    let mut schemes = EnabledSchemes::new();
    let err = schemes.set("SparkJob").unwrap_err();
    assert_eq!(err.to_string(), "scheme SparkJob is not supported yet");

    let mut mgr = local_manager(None);
    setup_reconcilers(&mut mgr, &schemes, false).unwrap();
    assert!(mgr.runnable_names().is_empty());
}

#[tokio::test]
async fn manager_runs_reconcilers_until_shutdown() {
    let mut schemes = EnabledSchemes::new();
    schemes.fill_all();

    let mut mgr = local_manager(Some("training"));
    setup_reconcilers(&mut mgr, &schemes, true).unwrap();
    mgr.add_healthz_check("healthz", ping()).unwrap();
    mgr.add_readyz_check("readyz", ping()).unwrap();

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(mgr.start(async move {
        let _ = stop_rx.await;
    }));

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!handle.is_finished(), "manager should keep running");

    stop_tx.send(()).unwrap();
    let result = tokio::time::timeout(TIMEOUT, handle)
        .await
        .expect("manager should stop within timeout")
        .expect("join handle should not panic");
    assert!(result.is_ok());
}
