//! Pre-mix subcommand - limit, normalize, then slice and transcribe each channel.

use eyre::Result;
use fapmix_pipeline::config::ToolConfig;
use fapmix_pipeline::premix::{PreMixRequest, process_audio};
use fapmix_pipeline::stage::StageRunner;
use std::path::PathBuf;

/// CLI arguments for the pre-mix pipeline.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Directory of source audio, processed in place
    pub input: PathBuf,

    /// Output directory for channel folders and slices
    pub output: PathBuf,

    #[command(flatten)]
    pub tool: ToolConfig,
}

/// Resolved configuration for a pre-mix run.
#[derive(Debug)]
pub struct Config {
    pub request: PreMixRequest,
    pub tool: ToolConfig,
}

impl TryFrom<Args> for Config {
    type Error = eyre::Error;

    fn try_from(args: Args) -> Result<Self> {
        Ok(Self {
            request: PreMixRequest {
                audio_input_dir: args.input,
                output_dir: args.output,
            },
            tool: args.tool,
        })
    }
}

pub fn execute(config: Config) -> Result<()> {
    tracing::info!(
        input = ?config.request.audio_input_dir.display(),
        output = ?config.request.output_dir.display(),
        "pre-mix"
    );

    let mut runner = StageRunner::new(config.tool);
    process_audio(&mut runner, &config.request)?;

    Ok(())
}
