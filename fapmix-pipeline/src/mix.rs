//! Post-processing mix: download, convert, separate, slice, transcribe, rename, archive.
//!
//! Layout of one run:
//!
//! ```text
//! <output>/output_<YYYYmmdd_HHMMSS>/
//! ├── wav_conversion/
//! ├── separation_output/
//! ├── slicing_output/<segments>/
//! ├── final_output/
//! └── <date>-<identifier>.zip
//! ```

use crate::archive::{archive_name, oldest_file_date, zip_final_output};
use crate::download::{Downloader, download_audio};
use crate::error::{Error, Result};
use crate::rename::{RenamedPair, find_slice_subdir, rename_and_copy_transcriptions};
use crate::sanitize::{IDENTIFIER_MAX_LEN, sanitize_filename};
use crate::stage::{Stage, StageExecutor, StageRunner};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

pub const WAV_DIR: &str = "wav_conversion";
pub const SEPARATION_DIR: &str = "separation_output";
pub const SLICING_DIR: &str = "slicing_output";
pub const FINAL_DIR: &str = "final_output";

/// Inputs of one mix run.
#[derive(Clone, Debug, Default)]
pub struct MixRequest {
    /// Directory of source audio, ignored when `url` is set
    pub audio_input_dir: PathBuf,
    /// Parent of the timestamped run directory
    pub output_dir: PathBuf,
    /// Media URL to download instead of reading `audio_input_dir`
    pub url: Option<String>,
}

impl MixRequest {
    /// URL if present and non-blank.
    fn url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

/// What a completed run produced.
#[derive(Clone, Debug)]
pub struct MixOutput {
    pub run_dir: PathBuf,
    pub archive: PathBuf,
    pub pairs: Vec<RenamedPair>,
}

/// `output_<YYYYmmdd_HHMMSS>`
pub fn run_dir_name(now: DateTime<Local>) -> String {
    format!("output_{}", now.format("%Y%m%d_%H%M%S"))
}

/// Run the whole mix pipeline.
///
/// Returns `Ok(None)` when the run ends early with a logged error: no usable
/// input directory, or no segment directory after slicing. Stage failures
/// follow the runner's failure policy.
pub fn process_audio<E, D>(
    runner: &mut StageRunner<E>,
    downloader: &mut D,
    request: &MixRequest,
) -> Result<Option<MixOutput>>
where
    E: StageExecutor,
    D: Downloader,
{
    let run_dir = request.output_dir.join(run_dir_name(Local::now()));
    create_dir(&run_dir)?;

    tracing::info!(dir = ?run_dir.display(), "starting mix run");

    let (input_dir, identifier) = match request.url() {
        Some(url) => match download_audio(downloader, url, &run_dir) {
            Some(downloaded) => (downloaded.dir, downloaded.title),
            None => {
                tracing::error!(url, "download produced no input to process");
                return Ok(None);
            }
        },
        None => (
            request.audio_input_dir.clone(),
            request.output_dir.to_string_lossy().into_owned(),
        ),
    };

    let identifier = sanitize_filename(&identifier, IDENTIFIER_MAX_LEN);

    if !input_dir.is_dir() {
        tracing::error!(input = ?input_dir.display(), "no valid input directory provided");
        return Ok(None);
    }

    let wav_dir = run_dir.join(WAV_DIR);
    let separation_dir = run_dir.join(SEPARATION_DIR);
    let slicing_dir = run_dir.join(SLICING_DIR);
    let final_dir = run_dir.join(FINAL_DIR);
    create_dir(&final_dir)?;

    let config = runner.config().clone();

    runner.run(&Stage::to_wav(&input_dir, &wav_dir))?;
    runner.run(&Stage::separate(&wav_dir, &separation_dir))?;
    runner.run(&Stage::slice(&separation_dir, &slicing_dir, config.min_duration))?;
    runner.run(&Stage::transcribe(&slicing_dir, &config.lang))?;

    let Some(segments_dir) = find_slice_subdir(&slicing_dir)? else {
        tracing::error!(
            dir = ?slicing_dir.display(),
            "no subfolder found in slicing output for renaming and copying"
        );
        return Ok(None);
    };

    let pairs = rename_and_copy_transcriptions(&segments_dir, &final_dir)?;

    let name = archive_name(&oldest_file_date(&input_dir)?, &identifier);
    let archive = zip_final_output(&final_dir, &run_dir, &name)?;

    tracing::info!(dir = ?run_dir.display(), "mix run completed");

    Ok(Some(MixOutput {
        run_dir,
        archive,
        pairs,
    }))
}

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| Error::io("failed to create directory", dir, e))
}
