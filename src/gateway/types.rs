//! Gateway domain and wire types
//!
//! The compute API instance resource is much larger than what the
//! orchestrator needs; the wire structs here deserialize only the
//! `networkInterfaces` slice and tolerate everything else.

use serde::{Deserialize, Serialize};

use super::errors::{GatewayError, GatewayResult};

/// Snapshot of a node's primary network interface.
///
/// Ephemeral by design: fetched fresh before every mutation and discarded
/// afterwards. The fingerprint is only valid until the interface is next
/// modified by anyone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInterfaceState {
    /// Opaque optimistic-concurrency token from the provider
    pub fingerprint: String,
    /// Alias IP ranges in CIDR form; zero or one entries in practice
    pub alias_ranges: Vec<String>,
}

impl NetworkInterfaceState {
    /// Whether this interface carries the given `/32` alias range.
    pub fn holds(&self, cidr: &str) -> bool {
        self.alias_ranges.iter().any(|r| r == cidr)
    }

    /// Whether the alias range list is empty.
    pub fn is_clear(&self) -> bool {
        self.alias_ranges.is_empty()
    }
}

// ==================
// Wire types
// ==================

/// Instance resource, reduced to the interface slice.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InstanceResource {
    #[serde(default)]
    network_interfaces: Vec<NetworkInterfaceResource>,
}

impl InstanceResource {
    /// Extract the primary (first) interface as domain state.
    ///
    /// The fingerprint is required: patching without one is impossible, so
    /// its absence is a malformed response, not an empty state.
    pub(crate) fn primary_interface(self, node: &str) -> GatewayResult<NetworkInterfaceState> {
        let nic = self
            .network_interfaces
            .into_iter()
            .next()
            .ok_or_else(|| {
                GatewayError::MalformedResponse(format!(
                    "instance {} has no network interfaces",
                    node
                ))
            })?;

        let fingerprint = nic.fingerprint.ok_or_else(|| {
            GatewayError::MalformedResponse(format!(
                "primary interface of {} has no fingerprint",
                node
            ))
        })?;

        Ok(NetworkInterfaceState {
            fingerprint,
            alias_ranges: nic
                .alias_ip_ranges
                .into_iter()
                .map(|r| r.ip_cidr_range)
                .collect(),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NetworkInterfaceResource {
    fingerprint: Option<String>,
    #[serde(default)]
    alias_ip_ranges: Vec<AliasIpRange>,
}

/// One alias range entry as the provider represents it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AliasIpRange {
    pub ip_cidr_range: String,
}

/// Body of the updateNetworkInterface patch: replace-whole-list semantics
/// guarded by the fingerprint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InterfacePatch {
    pub fingerprint: String,
    pub alias_ip_ranges: Vec<AliasIpRange>,
}

impl InterfacePatch {
    pub(crate) fn new(fingerprint: &str, ranges: &[String]) -> Self {
        Self {
            fingerprint: fingerprint.to_string(),
            alias_ip_ranges: ranges
                .iter()
                .map(|r| AliasIpRange {
                    ip_cidr_range: r.clone(),
                })
                .collect(),
        }
    }
}
