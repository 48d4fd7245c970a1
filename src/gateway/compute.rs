//! GCE compute API gateway
//!
//! Production [`InterfaceGateway`] implementation. Reads the instance
//! resource and patches the primary interface's alias range list through
//! the `updateNetworkInterface` endpoint, which enforces the fingerprint
//! compare-and-swap server-side (HTTP 412 on mismatch).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::inventory::Node;

use super::errors::{GatewayError, GatewayResult};
use super::token::AccessTokenProvider;
use super::types::{InstanceResource, InterfacePatch, NetworkInterfaceState};
use super::InterfaceGateway;

const COMPUTE_ENDPOINT: &str = "https://compute.googleapis.com/compute/v1";

/// The primary interface of a GCE instance.
const PRIMARY_INTERFACE: &str = "nic0";

/// Per-request deadline; a timeout surfaces as `UpstreamUnavailable`.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Compute API client scoped to one project.
pub struct ComputeGateway {
    client: reqwest::Client,
    tokens: Arc<dyn AccessTokenProvider>,
    project: String,
    endpoint: String,
}

impl ComputeGateway {
    pub fn new(
        tokens: Arc<dyn AccessTokenProvider>,
        project: impl Into<String>,
    ) -> GatewayResult<Self> {
        Self::with_endpoint(tokens, project, COMPUTE_ENDPOINT)
    }

    /// Use an alternate API endpoint (tests, API emulators).
    pub fn with_endpoint(
        tokens: Arc<dyn AccessTokenProvider>,
        project: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                GatewayError::UpstreamUnavailable(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            tokens,
            project: project.into(),
            endpoint: endpoint.into(),
        })
    }

    fn instance_url(&self, node: &Node) -> String {
        format!(
            "{}/projects/{}/zones/{}/instances/{}",
            self.endpoint, self.project, node.zone, node.name
        )
    }
}

#[async_trait]
impl InterfaceGateway for ComputeGateway {
    async fn fetch(&self, node: &Node) -> GatewayResult<NetworkInterfaceState> {
        let token = self.tokens.access_token().await?;

        let response = self
            .client
            .get(self.instance_url(node))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| GatewayError::UpstreamUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GatewayError::UpstreamUnavailable(format!(
                "fetching instance {} returned {}",
                node.name,
                response.status()
            )));
        }

        let resource: InstanceResource = response.json().await.map_err(|e| {
            GatewayError::MalformedResponse(format!(
                "instance {} body did not parse: {}",
                node.name, e
            ))
        })?;

        resource.primary_interface(&node.name)
    }

    async fn set_alias_ranges(
        &self,
        node: &Node,
        fingerprint: &str,
        ranges: &[String],
    ) -> GatewayResult<()> {
        let token = self.tokens.access_token().await?;
        let patch = InterfacePatch::new(fingerprint, ranges);

        let url = format!("{}/updateNetworkInterface", self.instance_url(node));
        let response = self
            .client
            .patch(url)
            .query(&[("networkInterface", PRIMARY_INTERFACE)])
            .bearer_auth(token)
            .json(&patch)
            .send()
            .await
            .map_err(|e| GatewayError::UpstreamUnavailable(e.to_string()))?;

        // 412 is the provider's fingerprint-mismatch signal.
        if response.status() == StatusCode::PRECONDITION_FAILED {
            return Err(GatewayError::ConflictFingerprintStale(node.name.clone()));
        }

        if !response.status().is_success() {
            return Err(GatewayError::UpstreamUnavailable(format!(
                "patching instance {} returned {}",
                node.name,
                response.status()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticToken;

    #[async_trait]
    impl AccessTokenProvider for StaticToken {
        async fn access_token(&self) -> GatewayResult<String> {
            Ok("test-token".to_string())
        }
    }

    fn gateway() -> ComputeGateway {
        ComputeGateway::new(Arc::new(StaticToken), "test-project").unwrap()
    }

    #[test]
    fn test_instance_url_shape() {
        let node = Node::new("node-a", "asia-southeast1-a");
        assert_eq!(
            gateway().instance_url(&node),
            "https://compute.googleapis.com/compute/v1/projects/test-project\
             /zones/asia-southeast1-a/instances/node-a"
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_upstream_unavailable() {
        let gw = ComputeGateway::with_endpoint(
            Arc::new(StaticToken),
            "test-project",
            "http://192.0.2.1:1/compute/v1",
        )
        .unwrap();

        let node = Node::new("node-a", "zone-a");
        let result = gw.fetch(&node).await;
        assert!(matches!(result, Err(GatewayError::UpstreamUnavailable(_))));
    }
}
