//! Collaborator traits - registry and audit boundaries
//!
//! The router consumes these capabilities, it never owns their storage.
//! Implementations must be safe for concurrent requests (read-mostly
//! registry, append-only audit log).

use crate::{AuditRecord, Destination, RelayError};

/// Destination and settings lookup
///
/// The router queries destinations once per request (batched), then matches
/// in memory by name.
#[trait_variant::make(DestinationRegistry: Send)]
pub trait LocalDestinationRegistry {
    /// Fetch destinations, optionally filtered by exact name
    ///
    /// # Errors
    /// Infrastructure failure only; an absent destination is not an error
    /// at this boundary.
    async fn destinations(&self, filter: Option<&str>) -> Result<Vec<Destination>, RelayError>;

    /// Default strategy identifier, if one is configured
    async fn default_strategy(&self) -> Result<Option<String>, RelayError>;
}

/// Append-only audit log
#[trait_variant::make(AuditSink: Send)]
pub trait LocalAuditSink {
    /// Append one record; exactly one call per completed request
    async fn record(&self, record: &AuditRecord) -> Result<(), RelayError>;
}
