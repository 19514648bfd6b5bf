//! Per-request outcome reporting and the audit record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::EventRequest;

/// Outcome for one requested destination
///
/// `selected` preserves the historical response contract: true iff the
/// destination was known and the strategy selected its intent. `delivered`
/// is present only when a physical dispatch attempt was made, and reports
/// whether that attempt succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    pub selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered: Option<bool>,
}

impl DispatchOutcome {
    /// Destination was selected and a delivery attempt was made
    pub fn selected(delivered: bool) -> Self {
        Self {
            selected: true,
            delivered: Some(delivered),
        }
    }

    /// Destination was unknown or not selected; nothing was dispatched
    pub fn not_selected() -> Self {
        Self {
            selected: false,
            delivered: None,
        }
    }
}

/// Map of destination name to outcome, one key per requested name
pub type OutcomeMap = BTreeMap<String, DispatchOutcome>;

/// Completed routing result for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOutcome {
    /// Request correlation id, generated when the request was received
    pub request_id: Uuid,

    /// Per-destination outcomes
    pub outcomes: OutcomeMap,
}

impl RouteOutcome {
    /// Legacy response shape: destination name to the `selected` boolean
    pub fn selected_map(&self) -> BTreeMap<String, bool> {
        self.outcomes
            .iter()
            .map(|(name, outcome)| (name.clone(), outcome.selected))
            .collect()
    }
}

/// Write-once audit entry: request id, full original request, outcome map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub request_id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub request: EventRequest,
    pub outcomes: OutcomeMap,
}

impl AuditRecord {
    pub fn new(request_id: Uuid, request: EventRequest, outcomes: OutcomeMap) -> Self {
        Self {
            request_id,
            recorded_at: Utc::now(),
            request,
            outcomes,
        }
    }
}
