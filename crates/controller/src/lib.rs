pub mod bootstrap;
pub mod error;
pub mod manager;
pub mod probes;
pub mod reconciler;
pub mod registry;
pub mod runtime;
pub mod schemes;

pub use bootstrap::setup_reconcilers;
pub use error::{BootstrapError, ManagerError, SchemeError};
pub use manager::{ping, shutdown_channel, HealthChecker, Manager, Runnable, ShutdownSignal};
pub use reconciler::JobReconciler;
pub use registry::{supported_schemes, ReconcilerSetupFn, SchemeRegistry};
pub use runtime::{ControllerManager, ManagerOptions};
pub use schemes::EnabledSchemes;
