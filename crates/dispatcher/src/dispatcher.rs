//! TransportDispatcher - per-destination delivery with failure isolation

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, instrument};
use uuid::Uuid;

use contracts::{Destination, RelaySettings, Transport};

use crate::error::DispatchError;
use crate::metrics::{DispatchMetrics, MetricsSnapshot};
use crate::transports::{http, log};

/// Dispatcher configuration
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Outbound delivery timeout per destination
    pub timeout: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(contracts::DEFAULT_DISPATCH_TIMEOUT_MS),
        }
    }
}

impl DispatchConfig {
    /// Derive the dispatch configuration from resolved settings
    pub fn from_settings(settings: &RelaySettings) -> Self {
        Self {
            timeout: Duration::from_millis(settings.dispatch_timeout_ms),
        }
    }
}

/// Result of a single delivery attempt
///
/// Infallible by design: every failure is contained here, nothing is raised
/// to the caller.
#[derive(Debug)]
pub enum DeliveryResult {
    /// Payload reached the destination
    Delivered,
    /// Attempt failed; the cause has already been logged
    Failed(DispatchError),
}

impl DeliveryResult {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// Polymorphic dispatcher over transport schemes
///
/// Cheap to clone; the HTTP client and metrics are shared.
#[derive(Debug, Clone)]
pub struct TransportDispatcher {
    client: reqwest::Client,
    timeout: Duration,
    metrics: Arc<DispatchMetrics>,
}

impl TransportDispatcher {
    /// Create a dispatcher with the given configuration
    ///
    /// # Errors
    /// `DispatchError::ClientBuild` when the HTTP client cannot be constructed.
    pub fn new(config: DispatchConfig) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DispatchError::ClientBuild {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            timeout: config.timeout,
            metrics: Arc::new(DispatchMetrics::new()),
        })
    }

    /// Current metrics
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Dispatch the payload to one destination.
    ///
    /// Failures are caught, logged with destination name and cause, and
    /// returned as a non-fatal `DeliveryResult::Failed`. One destination's
    /// failure never affects another's dispatch.
    #[instrument(
        name = "dispatch",
        skip(self, payload),
        fields(
            request_id = %request_id,
            destination = %destination.name,
            transport = %destination.transport
        )
    )]
    pub async fn dispatch(
        &self,
        request_id: Uuid,
        destination: &Destination,
        payload: &Value,
    ) -> DeliveryResult {
        self.metrics.inc_attempted();

        let result = match &destination.transport {
            Transport::Http { method, url } => {
                http::deliver(
                    &self.client,
                    request_id,
                    &destination.name,
                    *method,
                    url,
                    payload,
                    self.timeout,
                )
                .await
            }
            Transport::Log { level } => {
                log::emit(request_id, &destination.name, *level);
                Ok(())
            }
        };

        match result {
            Ok(()) => {
                self.metrics.inc_delivered();
                debug!("Dispatch complete");
                DeliveryResult::Delivered
            }
            Err(e) => {
                self.metrics.inc_failed();
                error!(error = %e, "Delivery failed");
                DeliveryResult::Failed(e)
            }
        }
    }
}
