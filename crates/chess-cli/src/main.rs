//! Command-line front end for the stateless chess rules.
//!
//! Every subcommand takes a position (`--fen`, or `start_fen` from the
//! config) and prints one answer on stdout. Logs go to stderr.

mod commands;
mod config;

use anyhow::Context;
use clap::Parser;
use commands::Command;
use config::CliConfig;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "chess-cli")]
#[command(about = "Answer chess rules questions about FEN positions")]
struct Cli {
    /// Path to the TOML config file (default: chess-cli.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level, overriding the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref()).context("loading configuration")?;

    let level: Level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.log_level)
        .parse()
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(command = ?cli.command, "running command");
    let output = commands::run(&cli.command, &config)?;
    println!("{}", output);
    Ok(())
}
