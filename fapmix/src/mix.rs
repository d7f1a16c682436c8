//! Mix subcommand - download or read audio, separate, slice, transcribe and archive.

use color_eyre::Section;
use eyre::{OptionExt, Result, eyre};
use fapmix_pipeline::config::ToolConfig;
use fapmix_pipeline::download::YtDlp;
use fapmix_pipeline::mix::{MixRequest, process_audio};
use fapmix_pipeline::stage::StageRunner;
use std::path::PathBuf;

/// CLI arguments for the mix pipeline.
#[derive(clap::Args, Debug)]
pub struct Args {
    /// Directory of source audio (ignored with --url)
    pub input: PathBuf,

    /// Output directory (default: system download directory)
    pub output: Option<PathBuf>,

    /// Download audio from this URL instead of reading INPUT
    #[arg(short, long)]
    pub url: Option<String>,

    #[command(flatten)]
    pub tool: ToolConfig,
}

/// Resolved configuration for a mix run.
#[derive(Debug)]
pub struct Config {
    pub request: MixRequest,
    pub tool: ToolConfig,
}

impl TryFrom<Args> for Config {
    type Error = eyre::Error;

    fn try_from(args: Args) -> Result<Self> {
        let output_dir = match args.output {
            Some(dir) => dir,
            None => dirs::download_dir().ok_or_eyre("failed to get download directory")?,
        };

        Ok(Self {
            request: MixRequest {
                audio_input_dir: args.input,
                output_dir,
                url: args.url,
            },
            tool: args.tool,
        })
    }
}

pub fn execute(config: Config) -> Result<()> {
    tracing::info!(
        input = ?config.request.audio_input_dir.display(),
        output = ?config.request.output_dir.display(),
        url = ?config.request.url,
        "mix"
    );

    let mut runner = StageRunner::new(config.tool);

    let out = process_audio(&mut runner, &mut YtDlp::default(), &config.request)?;

    let Some(out) = out else {
        return Err(eyre!("mix run ended before producing an archive"))
            .with_note(|| "the input directory or the slicing output was missing")
            .with_suggestion(|| "rerun with RUST_LOG=debug to see each stage");
    };

    println!("{}", out.run_dir.display());

    Ok(())
}
