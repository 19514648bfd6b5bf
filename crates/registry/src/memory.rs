//! MemoryRegistry - in-memory destination and settings store

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use contracts::{Destination, DestinationRegistry, RelayBlueprint, RelayError};

/// In-memory registry, read-mostly, shared across concurrent requests
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    destinations: Vec<Destination>,
    default_strategy: Option<String>,
}

impl MemoryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a resolved blueprint
    pub fn from_blueprint(blueprint: &RelayBlueprint) -> Self {
        info!(
            destinations = blueprint.destinations.len(),
            default_strategy = ?blueprint.settings.default_strategy,
            "Registry loaded from blueprint"
        );
        Self {
            inner: Arc::new(RwLock::new(Inner {
                destinations: blueprint.destinations.clone(),
                default_strategy: blueprint.settings.default_strategy.clone(),
            })),
        }
    }

    /// Insert or replace a destination by name
    pub async fn upsert(&self, destination: Destination) {
        let mut inner = self.inner.write().await;
        match inner
            .destinations
            .iter_mut()
            .find(|d| d.name == destination.name)
        {
            Some(existing) => *existing = destination,
            None => inner.destinations.push(destination),
        }
    }

    /// Set the default strategy identifier
    pub async fn set_default_strategy(&self, strategy: Option<String>) {
        self.inner.write().await.default_strategy = strategy;
    }
}

impl DestinationRegistry for MemoryRegistry {
    #[instrument(name = "registry_destinations", skip(self))]
    async fn destinations(&self, filter: Option<&str>) -> Result<Vec<Destination>, RelayError> {
        let inner = self.inner.read().await;
        let destinations: Vec<Destination> = match filter {
            Some(name) => inner
                .destinations
                .iter()
                .filter(|d| d.name == name)
                .cloned()
                .collect(),
            None => inner.destinations.clone(),
        };
        debug!(count = destinations.len(), "Destinations fetched");
        Ok(destinations)
    }

    #[instrument(name = "registry_default_strategy", skip(self))]
    async fn default_strategy(&self) -> Result<Option<String>, RelayError> {
        let strategy = self.inner.read().await.default_strategy.clone();
        debug!(strategy = ?strategy, "Default strategy fetched");
        Ok(strategy)
    }
}
