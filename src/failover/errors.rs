//! Failover error types

use thiserror::Error;

use crate::gateway::GatewayError;

/// Result type for failover operations
pub type FailoverResult<T> = Result<T, FailoverError>;

/// Errors surfaced by demote/promote operations.
///
/// Gateway failures pass through unmodified; the controller never
/// suppresses or retries them (the convergence loop retries verification
/// misses only, never errors).
#[derive(Debug, Error)]
pub enum FailoverError {
    /// A compute API or token call failed
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The promotion state machine was driven out of order.
    /// Indicates a controller bug, not an environmental failure.
    #[error("forbidden promotion phase transition: {from} -> {to}")]
    ForbiddenTransition {
        from: &'static str,
        to: &'static str,
    },
}

impl FailoverError {
    /// HTTP status code for the boundary layer.
    pub fn status_code(&self) -> u16 {
        match self {
            FailoverError::Gateway(e) => e.status_code(),
            FailoverError::ForbiddenTransition { .. } => 500,
        }
    }
}
