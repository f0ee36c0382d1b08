//! Travelsim CLI - drive a travel network from command scripts

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod instance;
mod output;
mod script;

use commands::{completions, run};

#[derive(Parser)]
#[command(name = "travelsim")]
#[command(author, version, about = "Transportation network simulator")]
pub struct Cli {
    /// Output format: table, json (overrides the config file)
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Config file to use instead of the default location
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the config file path
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(config::config_file_path)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a command script
    Run(run::RunArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Script output owns stdout
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting travelsim CLI");

    match &cli.command {
        Commands::Run(args) => run::run(args, &cli)?,
        Commands::Config(args) => commands::config::run(args, &cli.config_path())?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
