//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use eyre::Result;

#[derive(Debug, Parser)]
#[command(name = "fapmix")]
#[command(about = "Audio mixing pipelines around the fap toolkit")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert, separate, slice, transcribe and archive a directory or URL
    Mix(crate::mix::Args),

    /// Limit, normalize, then slice and transcribe each channel
    PreMix(crate::premix::Args),

    /// Print the registered nodes as JSON
    Nodes,

    /// Invoke a registered node by name
    Run(crate::nodes::Args),
}

/// Execute CLI command - separated for testing.
pub fn run_cli(cli: Cli) -> Result<()> {
    tracing::debug!(?cli, "parsed arguments");

    match cli.command {
        Commands::Mix(args) => crate::mix::execute(args.try_into()?),
        Commands::PreMix(args) => crate::premix::execute(args.try_into()?),
        Commands::Nodes => crate::nodes::list(),
        Commands::Run(args) => crate::nodes::execute(args.try_into()?),
    }
}
