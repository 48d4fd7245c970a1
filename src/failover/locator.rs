//! VIP holder location
//!
//! Read-only scan over the inventory: O(nodes) fetches, no mutation, no
//! retry. A fetch failure on any node aborts the scan and surfaces the
//! gateway error rather than silently skipping the node.

use crate::gateway::{GatewayResult, InterfaceGateway};
use crate::inventory::{ClusterInventory, Node};

/// Holder tie-break policy when more than one node transiently carries
/// the VIP (possible because per-node fetches are independent with no
/// global lock).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// The first matching node in inventory-file order is treated as the
    /// canonical holder. Deterministic, but a documented simplification
    /// rather than a correctness guarantee.
    InventoryOrder,
}

/// The policy in force. Named so tests can assert on it.
pub const TIE_BREAK: TieBreak = TieBreak::InventoryOrder;

/// Scans the inventory for the node currently carrying the VIP.
pub struct VipLocator<'a> {
    gateway: &'a dyn InterfaceGateway,
    inventory: &'a ClusterInventory,
}

impl<'a> VipLocator<'a> {
    pub fn new(gateway: &'a dyn InterfaceGateway, inventory: &'a ClusterInventory) -> Self {
        Self { gateway, inventory }
    }

    /// Return the first node (inventory order) whose alias ranges contain
    /// the VIP's `/32`, or `None` when nobody holds it.
    pub async fn locate_holder(&self) -> GatewayResult<Option<&'a Node>> {
        let vip_cidr = self.inventory.vip_cidr();

        for node in self.inventory.nodes() {
            let state = self.gateway.fetch(node).await?;
            if state.holds(&vip_cidr) {
                return Ok(Some(node));
            }
        }

        Ok(None)
    }
}
