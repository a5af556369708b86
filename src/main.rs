//! Clerk CLI - warehouse PO terminal

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use clerk::config::{ClerkConfig, LogConfig};
use clerk::error::{ClerkError, FixSuggestion};

#[derive(Parser)]
#[command(name = "clerk")]
#[command(about = "Clerk - upload, parse and look up purchase-order PDFs")]
#[command(version)]
struct Cli {
    /// Path to a clerk.toml file (default: ./clerk.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ClerkError> {
    let config = ClerkConfig::load(cli.config.as_deref())?;
    init_tracing(&config.log)?;

    tracing::info!(database = %config.database.display(), "clerk starting");
    clerk::tui::run(&config).await?;
    tracing::info!("clerk stopped");
    Ok(())
}

/// Log to a file; stdout belongs to the terminal UI
fn init_tracing(log: &LogConfig) -> Result<(), ClerkError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log.file)
        .map_err(|e| ClerkError::Config {
            reason: format!("Failed to open log file {}: {}", log.file.display(), e),
        })?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.level))
        .map_err(|e| ClerkError::Config {
            reason: format!("Invalid log level '{}': {}", log.level, e),
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
