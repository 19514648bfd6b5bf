//! Dispatcher error types

use thiserror::Error;

/// Per-destination delivery failures
///
/// Never propagated past the dispatcher boundary; converted into a
/// `DeliveryResult` and logged.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Outbound connection or protocol error
    #[error("network error delivering to '{destination}': {message}")]
    Network { destination: String, message: String },

    /// Delivery exceeded the per-destination timeout
    #[error("delivery to '{destination}' timed out after {timeout_ms}ms")]
    Timeout { destination: String, timeout_ms: u64 },

    /// Destination answered with a non-success status
    #[error("destination '{destination}' answered status {status}")]
    Status { destination: String, status: u16 },

    /// HTTP client construction failed
    #[error("failed to build http client: {message}")]
    ClientBuild { message: String },
}

impl DispatchError {
    /// Create a network error
    pub fn network(destination: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            destination: destination.into(),
            message: message.into(),
        }
    }
}
