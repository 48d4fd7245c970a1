//! Network interface gateway
//!
//! Thin, typed access to the compute API operations the orchestrator
//! needs: read a node's primary network interface (fingerprint plus alias
//! IP ranges) and replace the alias range list under that fingerprint.
//!
//! The gateway is a trait so the failover controller can be driven
//! against a scripted in-memory implementation in tests; the production
//! implementation is [`ComputeGateway`], backed by the GCE REST API and a
//! bearer token fetched from the instance metadata server.
//!
//! Fingerprints are single-use optimistic-concurrency tokens: every
//! `set_alias_ranges` call must use the fingerprint returned by a `fetch`
//! performed earlier in the same logical operation. Fingerprints are never
//! cached across operations.

mod compute;
mod errors;
mod token;
mod types;

use async_trait::async_trait;

use crate::inventory::Node;

pub use compute::ComputeGateway;
pub use errors::{GatewayError, GatewayResult};
pub use token::{AccessTokenProvider, MetadataTokenProvider};
pub use types::NetworkInterfaceState;

/// Read/patch operations on a node's primary network interface.
#[async_trait]
pub trait InterfaceGateway: Send + Sync {
    /// Fetch the current primary-interface state for `node`.
    ///
    /// Fails with [`GatewayError::UpstreamUnavailable`] when the instance
    /// record cannot be retrieved and [`GatewayError::MalformedResponse`]
    /// when the expected interface shape is absent.
    async fn fetch(&self, node: &Node) -> GatewayResult<NetworkInterfaceState>;

    /// Replace the whole alias-IP-range list of `node`'s primary
    /// interface, guarded by `fingerprint`.
    ///
    /// Fails with [`GatewayError::ConflictFingerprintStale`] when the
    /// interface changed since the fingerprint was read. The mutation is
    /// not reversible here; undoing it means patching again.
    async fn set_alias_ranges(
        &self,
        node: &Node,
        fingerprint: &str,
        ranges: &[String],
    ) -> GatewayResult<()>;
}
