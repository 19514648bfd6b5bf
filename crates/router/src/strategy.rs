//! Strategy evaluation - pure selection of routing intents
//!
//! Strategies are a closed set plus explicitly registered named predicates.
//! Caller-supplied code is never evaluated.

use std::collections::HashMap;

use contracts::{RelayError, RoutingIntent};

/// Intents strictly smaller than this byte count pass `SMALL`
const SMALL_BYTES_LIMIT: u64 = 1024;

/// A compiled selection predicate registered under a strategy name
pub type IntentPredicate = Box<dyn Fn(&RoutingIntent) -> bool + Send + Sync>;

/// Built-in strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Builtin {
    /// Identity selection
    All,
    /// Intents flagged important
    Important,
    /// Intents with `bytes < 1024`
    Small,
}

impl Builtin {
    fn parse(id: &str) -> Option<Self> {
        match id {
            "ALL" => Some(Self::All),
            "IMPORTANT" => Some(Self::Important),
            "SMALL" => Some(Self::Small),
            _ => None,
        }
    }

    fn matches(&self, intent: &RoutingIntent) -> bool {
        match self {
            Self::All => true,
            Self::Important => intent.important,
            Self::Small => intent.bytes < SMALL_BYTES_LIMIT,
        }
    }
}

/// Pure, deterministic strategy evaluator
///
/// Evaluation is a function of the strategy identifier and the intent
/// sequence only; no hidden state, no I/O, input never mutated.
#[derive(Default)]
pub struct StrategyEvaluator {
    custom: HashMap<String, IntentPredicate>,
}

impl StrategyEvaluator {
    /// Evaluator with only the built-in strategies
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named predicate as an additional strategy.
    ///
    /// # Errors
    /// Built-in names cannot be shadowed and names cannot be registered twice.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        predicate: IntentPredicate,
    ) -> Result<(), RelayError> {
        let name = name.into();
        if Builtin::parse(&name).is_some() {
            return Err(RelayError::Other(format!(
                "cannot shadow built-in strategy '{name}'"
            )));
        }
        if self.custom.contains_key(&name) {
            return Err(RelayError::Other(format!(
                "strategy '{name}' already registered"
            )));
        }
        self.custom.insert(name, predicate);
        Ok(())
    }

    /// Select the subset of intents the strategy admits.
    ///
    /// Returns selected indices in input order.
    ///
    /// # Errors
    /// `RelayError::UnknownStrategy` for an unrecognized identifier. The
    /// caller treats this as non-fatal and proceeds with an empty selection.
    pub fn evaluate(
        &self,
        strategy: &str,
        intents: &[RoutingIntent],
    ) -> Result<Vec<usize>, RelayError> {
        if let Some(builtin) = Builtin::parse(strategy) {
            return Ok(Self::select(intents, |intent| builtin.matches(intent)));
        }
        if let Some(predicate) = self.custom.get(strategy) {
            return Ok(Self::select(intents, predicate));
        }
        Err(RelayError::UnknownStrategy {
            strategy: strategy.to_string(),
        })
    }

    fn select(intents: &[RoutingIntent], predicate: impl Fn(&RoutingIntent) -> bool) -> Vec<usize> {
        intents
            .iter()
            .enumerate()
            .filter(|(_, intent)| predicate(intent))
            .map(|(idx, _)| idx)
            .collect()
    }
}
