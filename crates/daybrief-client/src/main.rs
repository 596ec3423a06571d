//! daybrief CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use daybrief_client::cli::{Cli, Command, ConfigAction};
use daybrief_client::commands;
use daybrief_client::config::ClientConfig;
use daybrief_client::error::ClientResult;
use daybrief_core::{TracingConfig, TracingOutputFormat, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(ClientConfig::default_path);
    let config = if cli.config.is_some() {
        ClientConfig::load_from(&config_path)?
    } else {
        ClientConfig::load()?
    };

    // Initialize tracing
    let mut tracing_config = TracingConfig::interactive(cli.debug || config.debug);
    if cli.log_json {
        tracing_config = tracing_config.with_format(TracingOutputFormat::Json);
    }
    init_tracing(tracing_config)?;

    // Handle subcommands
    match cli.command {
        Command::Sync(ref args) => commands::sync::run(args, &config).await,
        Command::Calendars { ref snapshot } => {
            commands::calendars::run(snapshot.as_deref(), &config).await
        }
        Command::Brief(ref args) => commands::brief::run(args, &config),
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config, &config_path),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(&config_path),
        },
    }
}
