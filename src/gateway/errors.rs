//! Gateway error types

use thiserror::Error;

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors from the compute API and metadata service.
///
/// None of these are retried at this layer; they propagate unmodified to
/// the operation's caller.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Transport or HTTP failure talking to the compute API
    #[error("compute API unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The provider returned a response without the expected shape
    #[error("unexpected compute API response: {0}")]
    MalformedResponse(String),

    /// The provider rejected the fingerprint: the interface changed
    /// between our fetch and our patch
    #[error("interface fingerprint stale for {0}: interface changed since fetch")]
    ConflictFingerprintStale(String),

    /// The metadata token endpoint could not be reached
    #[error("metadata token endpoint unavailable: {0}")]
    AuthUnavailable(String),
}

impl GatewayError {
    /// HTTP status code for the boundary layer.
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::UpstreamUnavailable(_) => 503,
            GatewayError::MalformedResponse(_) => 502,
            GatewayError::ConflictFingerprintStale(_) => 409,
            GatewayError::AuthUnavailable(_) => 503,
        }
    }
}
