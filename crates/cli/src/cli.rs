//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Event Relay - strategy-driven event routing and dispatch
#[derive(Parser, Debug)]
#[command(
    name = "event-relay",
    author,
    version,
    about = "Strategy-driven event routing and dispatch engine",
    long_about = "Routes an event to configured destinations.\n\n\
                  Loads the destination registry from configuration, evaluates the \n\
                  routing strategy against the event's intents, dispatches the payload \n\
                  to each selected destination, and records the outcome."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "EVENT_RELAY_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "EVENT_RELAY_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Route an event through the configured destinations
    Route(RouteArgs),

    /// Validate configuration file without routing
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `route` command
#[derive(Parser, Debug, Clone)]
pub struct RouteArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, default_value = "relay.toml", env = "EVENT_RELAY_CONFIG")]
    pub config: PathBuf,

    /// Path to the event request JSON file
    #[arg(short, long, env = "EVENT_RELAY_EVENT")]
    pub event: PathBuf,

    /// Override the event's strategy field
    #[arg(long, env = "EVENT_RELAY_STRATEGY")]
    pub strategy: Option<String>,

    /// Append audit records to this JSON Lines file
    #[arg(long, env = "EVENT_RELAY_AUDIT_LOG")]
    pub audit_log: Option<PathBuf>,

    /// Override dispatch timeout from configuration (milliseconds)
    #[arg(long, env = "EVENT_RELAY_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Print selected and delivered per destination instead of the plain map
    #[arg(long)]
    pub detailed: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "EVENT_RELAY_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "relay.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "relay.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the destination list
    #[arg(long)]
    pub destinations: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
