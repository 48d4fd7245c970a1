//! Inventory error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Errors raised while loading or validating the cluster inventory.
///
/// All of these are fatal to startup: the daemon refuses to serve with a
/// configuration it cannot fully validate.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The inventory file could not be read
    #[error("failed to read inventory file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The inventory file is not valid YAML or is missing required keys
    #[error("invalid inventory YAML: {0}")]
    MalformedYaml(#[from] serde_yaml::Error),

    /// The `vip` key is not a bare IPv4 address
    #[error("invalid VIP '{0}': must be a bare IPv4 address without prefix")]
    InvalidVip(String),

    /// The `cluster` key lists no instances
    #[error("inventory defines no cluster nodes")]
    EmptyCluster,

    /// Two cluster entries share the same instance name
    #[error("duplicate node name in inventory: {0}")]
    DuplicateNode(String),

    /// A required string field is present but empty
    #[error("inventory field must not be empty: {0}")]
    EmptyField(&'static str),
}
