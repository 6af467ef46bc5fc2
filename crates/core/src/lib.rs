pub mod config;
pub mod error;
pub mod kind;

pub use config::OperatorConfig;
pub use error::*;
pub use kind::*;
