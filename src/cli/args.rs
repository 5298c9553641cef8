//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Insulin bolus monitor
///
/// Polls a loopback uploader API for recent boluses and raises a local
/// alert when a new dose at or above the threshold appears.
#[derive(Parser, Debug)]
#[command(name = "boluswatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "BOLUSWATCH_CONFIG")]
    pub config: Option<String>,

    /// Base URL of the uploader API
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Path to the state file
    #[arg(long, global = true)]
    pub state_file: Option<PathBuf>,

    /// Alert threshold in insulin units
    #[arg(long, global = true)]
    pub threshold: Option<f64>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a single check cycle and print its outcome
    Check,

    /// Run the periodic monitoring loop in the foreground
    Watch(WatchArgs),

    /// Show the persisted monitor state
    Status,

    /// Clear the persisted run flag so a running watch loop exits
    Stop,

    /// Clear all persisted monitor state
    Reset,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the watch command
#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Check interval in seconds
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Sleep after an unusable cycle before trying again, in seconds
    #[arg(long)]
    pub retry_interval: Option<u64>,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Only start if monitoring was running before (for boot hooks)
    #[arg(long)]
    pub resume: bool,
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
