//! boardfile CLI - terminal host for board attachment submissions
//!
//! Seeds the attachment list from a JSON description, replays file picks
//! and removals, and submits the result the same way the board form does.

mod cli;
mod commands;
mod error;
mod host;

#[cfg(test)]
mod tests;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::completions::run_completions;
use crate::commands::preview::run_preview;
use crate::commands::submit::run_submit;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("boardfile=info,boardfile_core=info"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Submit {
            changes,
            url,
            timeout,
        } => run_submit(&changes, url, timeout, config_path).await?,
        Commands::Preview { changes, json } => run_preview(&changes, json, config_path)?,
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref())?,
    }

    Ok(())
}
