//! CLI error types

use thiserror::Error;

use crate::gateway::GatewayError;
use crate::inventory::InventoryError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// The inventory file failed to load or validate
    #[error("configuration error: {0}")]
    Config(#[from] InventoryError),

    /// A gateway component could not be constructed
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// The --listen value did not parse as host:port
    #[error("invalid listen address: {0}")]
    InvalidListenAddr(String),

    /// The async runtime or server failed
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}
