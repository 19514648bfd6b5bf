//! `validate` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use contracts::{RelayBlueprint, Transport};

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    destination_count: usize,
    http_count: usize,
    log_count: usize,
    default_strategy: Option<String>,
    dispatch_timeout_ms: u64,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    // Check file exists
    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    // Try to load and validate
    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(summarize(&blueprint)),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

fn summarize(blueprint: &RelayBlueprint) -> ConfigSummary {
    let http_count = blueprint
        .destinations
        .iter()
        .filter(|d| matches!(d.transport, Transport::Http { .. }))
        .count();

    ConfigSummary {
        destination_count: blueprint.destinations.len(),
        http_count,
        log_count: blueprint.destinations.len() - http_count,
        default_strategy: blueprint.settings.default_strategy.clone(),
        dispatch_timeout_ms: blueprint.settings.dispatch_timeout_ms,
    }
}

fn collect_warnings(blueprint: &RelayBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    if blueprint.destinations.is_empty() {
        warnings.push("no destinations configured - every outcome will be false".to_string());
    }

    if let Some(strategy) = &blueprint.settings.default_strategy {
        if !matches!(strategy.as_str(), "ALL" | "IMPORTANT" | "SMALL") {
            warnings.push(format!(
                "default strategy '{strategy}' is not built in; unless registered it selects nothing"
            ));
        }
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);
        if let Some(summary) = &result.summary {
            println!(
                "  destinations: {} ({} http, {} log)",
                summary.destination_count, summary.http_count, summary.log_count
            );
            println!(
                "  default strategy: {}",
                summary.default_strategy.as_deref().unwrap_or("(fallback ALL)")
            );
            println!("  dispatch timeout: {}ms", summary.dispatch_timeout_ms);
        }
        if let Some(warnings) = &result.warnings {
            for warning in warnings {
                println!("  warning: {warning}");
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(error) = &result.error {
            println!("  {error}");
        }
    }
}
