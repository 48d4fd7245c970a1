//! Bearer token acquisition
//!
//! Every compute API call carries an OAuth bearer token. On GCE the token
//! comes from the instance metadata server; the trait seam lets tests
//! substitute a canned token.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::errors::{GatewayError, GatewayResult};

/// Default service-account token endpoint on the GCE metadata server.
const METADATA_TOKEN_URL: &str =
    "http://169.254.169.254/computeMetadata/v1/instance/service-accounts/default/token";

/// The metadata server answers fast or not at all.
const TOKEN_TIMEOUT: Duration = Duration::from_secs(5);

/// Source of bearer tokens for compute API calls.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Fetch an access token.
    ///
    /// Fails with [`GatewayError::AuthUnavailable`] when the endpoint is
    /// unreachable, aborting the operation before any mutation happens.
    async fn access_token(&self) -> GatewayResult<String>;
}

/// Token provider backed by the GCE instance metadata server.
pub struct MetadataTokenProvider {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[allow(unused)]
    expires_in: Option<u64>,
    #[allow(unused)]
    token_type: Option<String>,
}

impl MetadataTokenProvider {
    pub fn new() -> GatewayResult<Self> {
        Self::with_endpoint(METADATA_TOKEN_URL)
    }

    /// Use an alternate endpoint (tests, local metadata proxies).
    pub fn with_endpoint(endpoint: impl Into<String>) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(TOKEN_TIMEOUT)
            .build()
            .map_err(|e| {
                GatewayError::AuthUnavailable(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl AccessTokenProvider for MetadataTokenProvider {
    async fn access_token(&self) -> GatewayResult<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| GatewayError::AuthUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GatewayError::AuthUnavailable(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::AuthUnavailable(format!("invalid token response: {}", e)))?;

        Ok(token.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_shape() {
        let body = r#"{"access_token": "ya29.token", "expires_in": 3599, "token_type": "Bearer"}"#;
        let token: TokenResponse = serde_json::from_str(body).unwrap();
        assert_eq!(token.access_token, "ya29.token");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_auth_unavailable() {
        // Reserved TEST-NET address: nothing listens there.
        let provider = MetadataTokenProvider::with_endpoint("http://192.0.2.1:1/token").unwrap();
        let result = provider.access_token().await;
        assert!(matches!(result, Err(GatewayError::AuthUnavailable(_))));
    }
}
