//! `route` command implementation.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use contracts::{AuditSink, EventRequest, RelayError, RouteOutcome};
use dispatcher::{DispatchConfig, TransportDispatcher};
use registry::{JsonlAuditSink, MemoryAuditSink, MemoryRegistry};
use router::EventRouter;

use crate::cli::RouteArgs;

/// Execute the `route` command
pub async fn run_route(args: &RouteArgs) -> Result<()> {
    // Metrics endpoint (optional, one-shot runs usually leave it off)
    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
        info!(port = args.metrics_port, "Metrics endpoint available");
    }

    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config '{}'", args.config.display()))?;

    if blueprint.destinations.is_empty() {
        warn!("No destinations configured - every outcome will be false");
    }

    let mut request = read_event(args)?;
    if let Some(strategy) = &args.strategy {
        request.strategy = Some(strategy.clone());
    }

    let mut dispatch_config = DispatchConfig::from_settings(&blueprint.settings);
    if let Some(timeout_ms) = args.timeout_ms {
        dispatch_config.timeout = std::time::Duration::from_millis(timeout_ms);
    }
    let dispatcher = TransportDispatcher::new(dispatch_config)
        .map_err(|e| anyhow::anyhow!("Failed to build dispatcher: {e}"))?;

    let registry = MemoryRegistry::from_blueprint(&blueprint);
    let strategy_label = request
        .strategy
        .clone()
        .or_else(|| blueprint.settings.default_strategy.clone())
        .unwrap_or_else(|| contracts::FALLBACK_STRATEGY.to_string());

    let outcome = match &args.audit_log {
        Some(path) => {
            let audit = JsonlAuditSink::create(path)
                .await
                .with_context(|| format!("Failed to open audit log '{}'", path.display()))?;
            execute(registry, audit, dispatcher, request, &strategy_label).await?
        }
        None => {
            execute(
                registry,
                MemoryAuditSink::new(),
                dispatcher,
                request,
                &strategy_label,
            )
            .await?
        }
    };

    let output = if args.detailed {
        serde_json::to_string_pretty(&outcome.outcomes)?
    } else {
        serde_json::to_string_pretty(&outcome.selected_map())?
    };
    println!("{output}");

    Ok(())
}

async fn execute<A: AuditSink + Sync>(
    registry: MemoryRegistry,
    audit: A,
    dispatcher: TransportDispatcher,
    request: EventRequest,
    strategy_label: &str,
) -> Result<RouteOutcome> {
    let router = EventRouter::new(registry, audit, dispatcher);
    let started = Instant::now();

    let outcome = match router.route(request).await {
        Ok(outcome) => outcome,
        Err(RelayError::Validation { errors }) => {
            // 400-equivalent: structured field errors, nothing dispatched
            let report = serde_json::to_string_pretty(&errors)?;
            anyhow::bail!("Invalid event request:\n{report}");
        }
        Err(e) => return Err(e.into()),
    };

    observability::record_route_outcome(strategy_label, &outcome);
    for (name, destination_outcome) in &outcome.outcomes {
        if let Some(delivered) = destination_outcome.delivered {
            observability::record_delivery(name, delivered);
        }
    }
    observability::record_route_latency_ms(started.elapsed().as_secs_f64() * 1000.0);

    info!(
        request_id = %outcome.request_id,
        destinations = outcome.outcomes.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Event routed"
    );

    Ok(outcome)
}

fn read_event(args: &RouteArgs) -> Result<EventRequest> {
    let content = std::fs::read_to_string(&args.event)
        .with_context(|| format!("Failed to read event file '{}'", args.event.display()))?;

    serde_json::from_str(&content).with_context(|| {
        format!(
            "Event file '{}' does not match the request model",
            args.event.display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::RouteArgs;
    use std::io::Write;
    use std::path::PathBuf;

    fn route_args(config: PathBuf, event: PathBuf) -> RouteArgs {
        RouteArgs {
            config,
            event,
            strategy: None,
            audit_log: None,
            timeout_ms: None,
            detailed: false,
            metrics_port: 0,
        }
    }

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[tokio::test]
    async fn test_route_with_log_destinations() {
        let config = write_temp(
            ".toml",
            r#"
[[destinations]]
name = "trace"
transport = "log.info"
"#,
        );
        let event = write_temp(
            ".json",
            r#"{
                "payload": {"a": 1},
                "routingIntents": [
                    {"destinationName": "trace", "important": true, "bytes": 10}
                ],
                "strategy": "ALL"
            }"#,
        );

        let args = route_args(config.path().into(), event.path().into());
        assert!(run_route(&args).await.is_ok());
    }

    #[tokio::test]
    async fn test_route_writes_audit_log() {
        let config = write_temp(
            ".toml",
            "[[destinations]]\nname = \"trace\"\ntransport = \"log.debug\"\n",
        );
        let event = write_temp(
            ".json",
            r#"{"payload": {}, "routingIntents": [
                {"destinationName": "trace", "important": false, "bytes": 1}
            ]}"#,
        );
        let dir = tempfile::tempdir().unwrap();
        let audit_path = dir.path().join("audit.jsonl");

        let mut args = route_args(config.path().into(), event.path().into());
        args.audit_log = Some(audit_path.clone());
        run_route(&args).await.unwrap();

        let content = std::fs::read_to_string(&audit_path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_event_fails() {
        let config = write_temp(
            ".toml",
            "[[destinations]]\nname = \"trace\"\ntransport = \"log.info\"\n",
        );
        let event = write_temp(".json", r#"{"invalid": "data"}"#);

        let args = route_args(config.path().into(), event.path().into());
        let err = run_route(&args).await.unwrap_err();
        assert!(err.to_string().contains("does not match the request model"));
    }
}
