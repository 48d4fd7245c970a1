//! Inventory value types

use std::collections::HashSet;
use std::net::Ipv4Addr;

use serde::Serialize;

use super::errors::{InventoryError, InventoryResult};

/// A single compute instance that may hold the VIP.
///
/// Identity is `name`, unique within the inventory. Both fields are fixed
/// for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Instance name as known to the compute API
    pub name: String,
    /// Zone the instance lives in (e.g. "asia-southeast1-a")
    pub zone: String,
}

impl Node {
    pub fn new(name: impl Into<String>, zone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            zone: zone.into(),
        }
    }
}

/// Immutable view of the managed cluster.
///
/// Constructed once at startup and shared read-only from then on. Node
/// order is preserved from the inventory file; the holder tie-break in
/// the locator depends on it.
#[derive(Debug, Clone)]
pub struct ClusterInventory {
    project: String,
    vip: Ipv4Addr,
    nodes: Vec<Node>,
}

impl ClusterInventory {
    /// Build a validated inventory.
    ///
    /// Rejects an empty node list, duplicate node names, and empty
    /// project or node fields.
    pub fn new(
        project: impl Into<String>,
        vip: Ipv4Addr,
        nodes: Vec<Node>,
    ) -> InventoryResult<Self> {
        let project = project.into();
        if project.is_empty() {
            return Err(InventoryError::EmptyField("gcp_project"));
        }
        if nodes.is_empty() {
            return Err(InventoryError::EmptyCluster);
        }

        let mut seen = HashSet::new();
        for node in &nodes {
            if node.name.is_empty() {
                return Err(InventoryError::EmptyField("instance"));
            }
            if node.zone.is_empty() {
                return Err(InventoryError::EmptyField("location"));
            }
            if !seen.insert(node.name.as_str()) {
                return Err(InventoryError::DuplicateNode(node.name.clone()));
            }
        }

        Ok(Self {
            project,
            vip,
            nodes,
        })
    }

    /// GCP project the instances belong to.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// The managed VIP as a bare address.
    pub fn vip(&self) -> Ipv4Addr {
        self.vip
    }

    /// The VIP as the `/32` alias range carried on the holder's interface.
    pub fn vip_cidr(&self) -> String {
        format!("{}/32", self.vip)
    }

    /// All nodes, in inventory-file order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Look up a node by instance name.
    pub fn find_node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vip() -> Ipv4Addr {
        "10.0.0.5".parse().unwrap()
    }

    #[test]
    fn test_valid_inventory() {
        let inv = ClusterInventory::new(
            "proj",
            vip(),
            vec![Node::new("a", "z1"), Node::new("b", "z2")],
        )
        .unwrap();

        assert_eq!(inv.project(), "proj");
        assert_eq!(inv.vip_cidr(), "10.0.0.5/32");
        assert_eq!(inv.nodes().len(), 2);
    }

    #[test]
    fn test_empty_cluster_rejected() {
        let result = ClusterInventory::new("proj", vip(), vec![]);
        assert!(matches!(result, Err(InventoryError::EmptyCluster)));
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let result = ClusterInventory::new(
            "proj",
            vip(),
            vec![Node::new("a", "z1"), Node::new("a", "z2")],
        );
        assert!(matches!(result, Err(InventoryError::DuplicateNode(name)) if name == "a"));
    }

    #[test]
    fn test_find_node() {
        let inv = ClusterInventory::new("proj", vip(), vec![Node::new("a", "z1")]).unwrap();
        assert!(inv.find_node("a").is_some());
        assert!(inv.find_node("b").is_none());
    }

    #[test]
    fn test_empty_zone_rejected() {
        let result = ClusterInventory::new("proj", vip(), vec![Node::new("a", "")]);
        assert!(matches!(result, Err(InventoryError::EmptyField("location"))));
    }
}
