//! Cluster inventory
//!
//! Static view of the cluster this daemon manages: the GCP project, the
//! floating VIP, and the fixed set of instances that may hold it. The
//! inventory is loaded once at startup from `cluster_conf.yaml` and is
//! immutable for the process lifetime. No component holds ambient global
//! state; the inventory value is passed in explicitly everywhere.

mod errors;
mod loader;
mod types;

pub use errors::{InventoryError, InventoryResult};
pub use loader::{load, parse};
pub use types::{ClusterInventory, Node};
