//! Command-line interface definition.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// daybrief - A markdown agenda merged from your calendars
#[derive(Debug, Parser)]
#[command(name = "daybrief")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "DAYBRIEF_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Log as JSON lines (for cron and CI)
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Merge calendars into a markdown agenda
    Sync(SyncArgs),

    /// List the calendars the source offers
    Calendars {
        /// Calendar snapshot to read (overrides [source] snapshot)
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },

    /// Prepare the daily advisory
    Brief(BriefArgs),

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Options for `sync`. Unset options fall back to the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct SyncArgs {
    /// Calendar ids or names to merge (default: primary)
    #[arg(long, num_args = 1..)]
    pub calendars: Vec<String>,

    /// Number of days before today to include
    #[arg(long)]
    pub days_before: Option<u32>,

    /// Number of days after today to include
    #[arg(long)]
    pub days_ahead: Option<u32>,

    /// Output directory for the agenda file
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Calendar snapshot to read (overrides [source] snapshot)
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Render only today, grouped into all-day and scheduled events
    #[arg(long)]
    pub today: bool,

    /// Print the agenda instead of writing it
    #[arg(long)]
    pub stdout: bool,

    /// Exit with an error if any calendar or event was skipped
    #[arg(long)]
    pub strict: bool,

    /// Fetch timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Options for `brief`.
#[derive(Debug, Clone, Default, Args)]
pub struct BriefArgs {
    /// Date to prepare the advisory for (default: today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Generated advice to save as the daily update instead of printing
    /// the request
    #[arg(long)]
    pub advice: Option<PathBuf>,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
