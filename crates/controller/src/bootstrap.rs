use tracing::info;

use crate::error::{BootstrapError, SchemeError};
use crate::manager::Manager;
use crate::schemes::EnabledSchemes;

/// Attach a reconciler for every enabled scheme, in selection order.
///
/// Stops at the first failing setup function and returns its error
/// unchanged. Reconcilers attached before the failure stay attached.
pub fn setup_reconcilers(
    mgr: &mut dyn Manager,
    schemes: &EnabledSchemes<'_>,
    enable_gang_scheduling: bool,
) -> Result<(), BootstrapError> {
    let registry = schemes.registry();
    for kind in schemes.iter() {
        let setup = registry
            .lookup(kind)
            .ok_or_else(|| SchemeError::Unsupported(kind.to_string()))?;
        info!(scheme = %kind, gang_scheduling = enable_gang_scheduling, "setting up reconciler");
        setup(mgr, enable_gang_scheduling)?;
    }
    Ok(())
}
