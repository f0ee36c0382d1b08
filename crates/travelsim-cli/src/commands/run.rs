//! Run a command script against a fresh network

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::config::Config;
use crate::instance::InstanceManager;
use crate::output::OutputFormat;
use crate::script;
use crate::Cli;

#[derive(Args)]
pub struct RunArgs {
    /// Script file, or `-` to read from stdin
    pub script: PathBuf,

    /// Stop at the first failing line
    #[arg(long)]
    pub strict: bool,

    /// Maximum number of paths printed per exploration
    #[arg(long)]
    pub max_paths: Option<usize>,
}

pub fn run(args: &RunArgs, cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load(&cli.config_path());
    let format: OutputFormat = cli.format.as_deref().unwrap_or(&config.format).parse()?;
    let strict = args.strict || config.strict;
    let max_paths = args.max_paths.or(config.max_paths);

    let source = if args.script.as_os_str() == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read script from stdin")?;
        source
    } else {
        std::fs::read_to_string(&args.script)
            .with_context(|| format!("Failed to read script {}", args.script.display()))?
    };

    tracing::debug!(
        "Running script {:?} (format: {:?}, strict: {}, max_paths: {:?})",
        args.script,
        format,
        strict,
        max_paths
    );

    let mut instances = InstanceManager::new().with_max_paths(max_paths);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = script::run(&source, &mut instances, format, strict, &mut out)?;

    tracing::info!(
        "Executed {} commands, {} failed, {} entities remain",
        outcome.executed,
        outcome.failed,
        instances.manager().len()
    );
    Ok(())
}
