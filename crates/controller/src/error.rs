use thiserror::Error;

/// Error returned when user input names no registered job kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemeError {
    /// Carries the offending input verbatim.
    #[error("scheme {0} is not supported yet")]
    Unsupported(String),
}

/// Errors raised by a manager host or by a reconciler being attached to it.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("controller with name {0} already exists")]
    DuplicateController(String),

    #[error("{kind} check {name} is already registered")]
    DuplicateCheck { kind: &'static str, name: String },

    #[error("failed to bind health probes on {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("runnable {name} failed: {reason}")]
    Runnable { name: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while activating the enabled schemes.
///
/// Both variants are transparent: the caller sees exactly the error the
/// selector or the setup function produced.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Scheme(#[from] SchemeError),

    #[error(transparent)]
    Setup(#[from] ManagerError),
}
