//! Inventory loader
//!
//! Reads `cluster_conf.yaml` and produces a validated [`ClusterInventory`].
//! Wire shape (kept compatible with existing deployments):
//!
//! ```yaml
//! gcp_project: my-project
//! vip: 10.0.0.5
//! cluster:
//!   - instance: node-a
//!     location: asia-southeast1-a
//!   - instance: node-b
//!     location: asia-southeast1-b
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::errors::{InventoryError, InventoryResult};
use super::types::{ClusterInventory, Node};

/// On-disk inventory file shape.
#[derive(Debug, Deserialize)]
struct InventoryFile {
    gcp_project: String,
    vip: String,
    cluster: Vec<ClusterEntry>,
}

#[derive(Debug, Deserialize)]
struct ClusterEntry {
    instance: String,
    location: String,
}

/// Load and validate the inventory from a YAML file.
pub fn load(path: &Path) -> InventoryResult<ClusterInventory> {
    let content = fs::read_to_string(path).map_err(|source| InventoryError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content)
}

/// Parse and validate inventory YAML.
pub fn parse(yaml: &str) -> InventoryResult<ClusterInventory> {
    let file: InventoryFile = serde_yaml::from_str(yaml)?;

    let vip = file
        .vip
        .parse()
        .map_err(|_| InventoryError::InvalidVip(file.vip.clone()))?;

    let nodes = file
        .cluster
        .into_iter()
        .map(|entry| Node::new(entry.instance, entry.location))
        .collect();

    ClusterInventory::new(file.gcp_project, vip, nodes)
}
