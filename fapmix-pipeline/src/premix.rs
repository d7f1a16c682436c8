//! Pre-processing mix: limit, normalize, split channels, slice and transcribe each side.

use crate::error::{Error, Result};
use crate::stage::{Stage, StageExecutor, StageRunner};
use std::path::{Path, PathBuf};

pub const LEFT_DIR: &str = "left";
pub const RIGHT_DIR: &str = "right";
pub const STEREO_DIR: &str = "stereo";

/// Inputs of one pre-mix run.
#[derive(Clone, Debug, Default)]
pub struct PreMixRequest {
    pub audio_input_dir: PathBuf,
    pub output_dir: PathBuf,
}

/// Channel directories under the output directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelDirs {
    pub left: PathBuf,
    pub right: PathBuf,
    pub stereo: PathBuf,
}

impl ChannelDirs {
    pub fn under(output_dir: &Path) -> Self {
        Self {
            left: output_dir.join(LEFT_DIR),
            right: output_dir.join(RIGHT_DIR),
            stereo: output_dir.join(STEREO_DIR),
        }
    }

    fn create(&self) -> Result<()> {
        [&self.left, &self.right, &self.stereo]
            .into_iter()
            .try_for_each(|dir| {
                std::fs::create_dir_all(dir)
                    .map_err(|e| Error::io("failed to create channel directory", dir, e))
            })
    }
}

/// Run the pre-mix pipeline. Limiting and normalization modify the input in place.
pub fn process_audio<E: StageExecutor>(
    runner: &mut StageRunner<E>,
    request: &PreMixRequest,
) -> Result<ChannelDirs> {
    let dirs = ChannelDirs::under(&request.output_dir);
    dirs.create()?;

    let config = runner.config().clone();
    let input = &request.audio_input_dir;

    runner.run(&Stage::soft_limit(input, config.limit_db))?;
    runner.run(&Stage::normalize_loudness(input))?;

    identify_channel_pairs(input, &dirs);
    mix_to_stereo(&dirs);

    for channel in [&dirs.left, &dirs.right] {
        runner.run(&Stage::slice(channel, &request.output_dir, config.min_duration))?;
    }
    for channel in [&dirs.left, &dirs.right] {
        runner.run(&Stage::transcribe(channel, &config.lang))?;
    }

    tracing::info!("processing completed for pre-mix");

    Ok(dirs)
}

// TODO: split multichannel recordings into left/right once channel pairing rules are defined.
fn identify_channel_pairs(input: &Path, dirs: &ChannelDirs) {
    tracing::info!(
        input = ?input.display(),
        left = ?dirs.left.display(),
        right = ?dirs.right.display(),
        stereo = ?dirs.stereo.display(),
        "identifying channel pairs"
    );
}

fn mix_to_stereo(dirs: &ChannelDirs) {
    tracing::info!(
        left = ?dirs.left.display(),
        right = ?dirs.right.display(),
        stereo = ?dirs.stereo.display(),
        "mixing channels into stereo"
    );
}
