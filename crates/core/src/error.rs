use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid bind address '{address}' for {key}: {reason}")]
    InvalidBindAddress {
        key: &'static str,
        address: String,
        reason: String,
    },

    #[error("{key} must be greater than zero")]
    ZeroDuration { key: &'static str },
}
