//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.no_color);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load settings
    let settings_path = match cli.config {
        Some(path) => path,
        None => Settings::default_path()?,
    };
    let mut settings = Settings::load(&settings_path)?;

    if let Some(host) = cli.authority {
        settings.authority_host = host;
    }

    // Determine output format
    let output_format = cli
        .output
        .or(settings.output_format)
        .unwrap_or(OutputFormat::Pretty);

    // Create context for commands
    let ctx = commands::Context {
        settings,
        settings_path,
        output_format,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Enroll(args) => commands::enroll::execute(ctx, args).await,
        Commands::Run => commands::run::execute(ctx).await,
        Commands::Check => commands::check::execute(ctx).await,
        Commands::Profile => commands::profile::execute(ctx).await,
        Commands::Config(args) => commands::config::execute(ctx, args).await,
    }
}

/// Log to stderr so stdout stays clean for command output.
fn init_tracing(verbose: bool, no_color: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .init();
}
