//! EventRouter - per-request orchestration
//!
//! Pipeline per request: validate → resolve strategy → evaluate once →
//! resolve destinations (batched) → dispatch per intent → aggregate →
//! audit. Only validation aborts a request.

use std::collections::HashSet;

use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use contracts::{
    AuditRecord, AuditSink, Destination, DestinationRegistry, DispatchOutcome, EventRequest,
    OutcomeMap, RelayError, RouteOutcome, FALLBACK_STRATEGY,
};
use dispatcher::TransportDispatcher;

use crate::strategy::StrategyEvaluator;

/// Orchestrates strategy evaluation and per-destination dispatch
///
/// Collaborators are explicit construction-time dependencies; the router
/// holds no ambient state and is safe to share across concurrent requests.
pub struct EventRouter<R, A> {
    registry: R,
    audit: A,
    dispatcher: TransportDispatcher,
    evaluator: StrategyEvaluator,
}

impl<R, A> EventRouter<R, A>
where
    R: DestinationRegistry + Sync,
    A: AuditSink + Sync,
{
    /// Create a router with the built-in strategies
    pub fn new(registry: R, audit: A, dispatcher: TransportDispatcher) -> Self {
        Self {
            registry,
            audit,
            dispatcher,
            evaluator: StrategyEvaluator::new(),
        }
    }

    /// Create a router with a pre-configured evaluator (registered predicates)
    pub fn with_evaluator(
        registry: R,
        audit: A,
        dispatcher: TransportDispatcher,
        evaluator: StrategyEvaluator,
    ) -> Self {
        Self {
            registry,
            audit,
            dispatcher,
            evaluator,
        }
    }

    /// Route one event request to completion.
    ///
    /// Returns the full outcome map; the response map's key set equals the
    /// set of requested destination names. Per-destination conditions
    /// (unknown destination, delivery failure) are contained and never abort
    /// the request.
    ///
    /// # Errors
    /// - `RelayError::Validation` for a malformed request (no audit record
    ///   is written, nothing is dispatched)
    /// - collaborator infrastructure failures from the registry
    #[instrument(name = "route_event", skip(self, request), fields(request_id))]
    pub async fn route(&self, request: EventRequest) -> Result<RouteOutcome, RelayError> {
        let request_id = Uuid::new_v4();
        tracing::Span::current().record("request_id", tracing::field::display(request_id));
        info!(
            intents = request.routing_intents.len(),
            "Handling event request"
        );

        request.check_valid()?;

        let strategy = self.resolve_strategy(&request).await?;
        info!(strategy = %strategy, "Strategy resolved");

        // One batched registry query per request, matched in memory by name
        let destinations = self.registry.destinations(None).await?;

        let selected = self.evaluate(request_id, &strategy, &request);
        let outcomes = self
            .dispatch_intents(request_id, &request, &destinations, &selected)
            .await;

        let record = AuditRecord::new(request_id, request, outcomes.clone());
        if let Err(e) = self.audit.record(&record).await {
            // The outcome map is already complete; losing it would hurt more
            // than a gap in the audit log.
            error!(error = %e, "Audit write failed");
        }

        info!(destinations = outcomes.len(), "Request complete");
        Ok(RouteOutcome {
            request_id,
            outcomes,
        })
    }

    /// Explicit request strategy, else the registry default, else `ALL`
    async fn resolve_strategy(&self, request: &EventRequest) -> Result<String, RelayError> {
        if let Some(strategy) = &request.strategy {
            return Ok(strategy.clone());
        }
        Ok(self
            .registry
            .default_strategy()
            .await?
            .unwrap_or_else(|| FALLBACK_STRATEGY.to_string()))
    }

    /// Evaluate the strategy once for the whole request
    fn evaluate(
        &self,
        request_id: Uuid,
        strategy: &str,
        request: &EventRequest,
    ) -> HashSet<usize> {
        match self
            .evaluator
            .evaluate(strategy, &request.routing_intents)
        {
            Ok(indices) => indices.into_iter().collect(),
            Err(e) => {
                // Unknown strategy selects nothing but does not abort
                warn!(request_id = %request_id, error = %e, "Strategy evaluation selected nothing");
                HashSet::new()
            }
        }
    }

    /// Process every intent in input order, isolating failures per destination
    async fn dispatch_intents(
        &self,
        request_id: Uuid,
        request: &EventRequest,
        destinations: &[Destination],
        selected: &HashSet<usize>,
    ) -> OutcomeMap {
        let mut outcomes = OutcomeMap::new();

        for (idx, intent) in request.routing_intents.iter().enumerate() {
            let name = &intent.destination_name;

            let Some(destination) = destinations.iter().find(|d| &d.name == name) else {
                error!(
                    request_id = %request_id,
                    destination = %name,
                    "Unknown destination"
                );
                outcomes.insert(name.clone(), DispatchOutcome::not_selected());
                continue;
            };

            if selected.contains(&idx) {
                let result = self
                    .dispatcher
                    .dispatch(request_id, destination, &request.payload)
                    .await;
                outcomes.insert(name.clone(), DispatchOutcome::selected(result.is_delivered()));
            } else {
                debug!(
                    request_id = %request_id,
                    destination = %name,
                    "Destination not selected"
                );
                outcomes.insert(name.clone(), DispatchOutcome::not_selected());
            }
        }

        outcomes
    }
}
