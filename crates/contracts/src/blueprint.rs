//! Resolved relay configuration
//!
//! Produced by `config_loader` after descriptor parsing and validation;
//! consumed by the in-memory registry and the dispatcher.

use serde::{Deserialize, Serialize};

use crate::Destination;

/// Default outbound delivery timeout per destination
pub const DEFAULT_DISPATCH_TIMEOUT_MS: u64 = 10_000;

/// Fixed fallback strategy when neither the request nor the settings name one
pub const FALLBACK_STRATEGY: &str = "ALL";

/// Full resolved configuration: destinations plus settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayBlueprint {
    /// Known destinations with typed transports
    pub destinations: Vec<Destination>,

    /// Router/dispatcher settings
    #[serde(default)]
    pub settings: RelaySettings,
}

/// Tunable settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaySettings {
    /// Default strategy used when a request carries none
    pub default_strategy: Option<String>,

    /// Outbound delivery timeout per destination, milliseconds
    pub dispatch_timeout_ms: u64,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            default_strategy: None,
            dispatch_timeout_ms: DEFAULT_DISPATCH_TIMEOUT_MS,
        }
    }
}
