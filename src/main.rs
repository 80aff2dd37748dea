//! Profile-Lens main entry point
//!
//! This is the command-line interface for the Profile-Lens fetcher and analyzer.

use anyhow::Context;
use clap::{Parser, Subcommand};
use profile_lens::config::{load_config_with_hash, Config, StrategyKind};
use profile_lens::output::ExportFormat;
use profile_lens::pipeline::ErrorResponse;
use profile_lens::{LensError, ProfileService};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Profile-Lens: a polite profile fetcher and heuristic analyzer
///
/// Profile-Lens fetches public profile pages while respecting robots.txt and
/// per-host request spacing, extracts a structured record, and scores it with
/// deterministic heuristics.
#[derive(Parser, Debug)]
#[command(name = "profile-lens")]
#[command(version)]
#[command(about = "A polite profile fetcher and heuristic analyzer", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape one profile, store it and queue it for analysis
    Scrape {
        url: String,

        /// Try the headless browser before the plain HTTP fetch
        #[arg(long)]
        render_first: bool,
    },

    /// Scrape several profiles concurrently
    Batch {
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Analyze a stored profile
    Analyze {
        #[arg(value_name = "PROFILE-ID")]
        profile_id: String,
    },

    /// Export stored profiles (CSV takes several ids, JSON and HTML one)
    Export {
        #[arg(value_name = "PROFILE-ID", required = true)]
        profile_ids: Vec<String>,

        /// json, csv or html
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,
    },

    /// Validate the configuration and print the effective values
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load(&cli.config)?;

    match cli.command {
        Command::CheckConfig => {
            handle_check_config(&config)?;
            Ok(ExitCode::SUCCESS)
        }
        command => {
            let service = ProfileService::new(config).context("Failed to build profile service")?;
            let result = run(&service, command).await;
            service.shutdown().await;
            report(result)
        }
    }
}

/// Request failures are printed as an error response; anything else aborts
fn report(result: anyhow::Result<()>) -> anyhow::Result<ExitCode> {
    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => match e.downcast_ref::<LensError>() {
            Some(error) => {
                tracing::error!("{}", error);
                print_json(&ErrorResponse::from(error))?;
                Ok(ExitCode::FAILURE)
            }
            None => Err(e),
        },
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("profile_lens=info,warn"),
            1 => EnvFilter::new("profile_lens=debug,info"),
            2 => EnvFilter::new("profile_lens=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Option<PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Ok(Config::default())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(service: &ProfileService, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Scrape { url, render_first } => {
            let hint = render_first.then_some(StrategyKind::Rendered);
            let outcome = service.scrape(&url, hint).await?;
            print_json(&outcome)
        }
        Command::Batch { urls } => {
            let report = service.batch(&urls).await?;
            print_json(&report)
        }
        Command::Analyze { profile_id } => {
            let analysis = service.analyze(&profile_id)?;
            print_json(&analysis)
        }
        Command::Export {
            profile_ids,
            format,
        } => {
            let path = service.save_export(&profile_ids, format)?;
            println!("✓ Exported to: {}", path.display());
            Ok(())
        }
        Command::CheckConfig => handle_check_config(service.config()),
    }
}

/// Prints the effective configuration; loading it already validated it
fn handle_check_config(config: &Config) -> anyhow::Result<()> {
    println!("{}", toml::to_string_pretty(config)?);
    println!("✓ Configuration is valid");
    Ok(())
}
