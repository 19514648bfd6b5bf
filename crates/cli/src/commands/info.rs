//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;

use contracts::RelayBlueprint;

use crate::cli::InfoArgs;

#[derive(Serialize)]
struct InfoReport {
    config_path: String,
    destination_count: usize,
    default_strategy: Option<String>,
    dispatch_timeout_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    destinations: Option<Vec<DestinationInfo>>,
}

#[derive(Serialize)]
struct DestinationInfo {
    name: String,
    transport: String,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config '{}'", args.config.display()))?;

    let report = build_report(args, &blueprint);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn build_report(args: &InfoArgs, blueprint: &RelayBlueprint) -> InfoReport {
    let destinations = args.destinations.then(|| {
        blueprint
            .destinations
            .iter()
            .map(|d| DestinationInfo {
                name: d.name.clone(),
                transport: d.transport.descriptor(),
            })
            .collect()
    });

    InfoReport {
        config_path: args.config.display().to_string(),
        destination_count: blueprint.destinations.len(),
        default_strategy: blueprint.settings.default_strategy.clone(),
        dispatch_timeout_ms: blueprint.settings.dispatch_timeout_ms,
        destinations,
    }
}

fn print_report(report: &InfoReport) {
    println!("Config: {}", report.config_path);
    println!("Destinations: {}", report.destination_count);
    println!(
        "Default strategy: {}",
        report.default_strategy.as_deref().unwrap_or("(fallback ALL)")
    );
    println!("Dispatch timeout: {}ms", report.dispatch_timeout_ms);

    if let Some(destinations) = &report.destinations {
        for dest in destinations {
            println!("  {} -> {}", dest.name, dest.transport);
        }
    }
}
