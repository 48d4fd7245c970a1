//! HTTP surface
//!
//! Exposes the failover operations to an external health monitor or a
//! human operator. The boundary contract is simple: core outcomes are
//! tri-state (success / not-found / conflict) with a plain-text message,
//! and this layer maps them to 200 / 404 / 409.

mod cluster_routes;
mod config;
mod server;

pub use cluster_routes::{cluster_routes, ClusterState};
pub use config::HttpServerConfig;
pub use server::HttpServer;

/// All operational routes live under the legacy API prefix so existing
/// callers keep working.
pub const API_PREFIX: &str = "/manage-gce-floating-ip/api/v1.0";
