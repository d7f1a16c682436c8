//! External toolkit stages and the runner that executes them.
//!
//! A [`Stage`] is one invocation of the toolkit: a display name, the argument
//! list after the program, and the directory it writes into. [`StageRunner`]
//! creates that directory, executes the stage through a [`StageExecutor`] and
//! applies the configured [`FailurePolicy`].

use crate::config::{FailurePolicy, ToolConfig};
use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// One toolkit invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stage {
    /// Human readable stage name used in logs
    pub name: &'static str,
    /// Arguments passed after the program, subcommand first
    pub args: Vec<OsString>,
    /// Directory the stage writes into, created before it runs
    pub output_dir: Option<PathBuf>,
}

impl Stage {
    pub fn new<I, S>(name: &'static str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            name,
            args: args.into_iter().map(Into::into).collect(),
            output_dir: None,
        }
    }

    fn writing_to(mut self, dir: &Path) -> Self {
        self.output_dir = Some(dir.to_path_buf());
        self
    }

    /// `to-wav --recursive <input> <output>`
    pub fn to_wav(input: &Path, output: &Path) -> Self {
        Self::new(
            "WAV Conversion",
            [
                OsString::from("to-wav"),
                "--recursive".into(),
                input.into(),
                output.into(),
            ],
        )
        .writing_to(output)
    }

    /// `separate <input> <output>`
    pub fn separate(input: &Path, output: &Path) -> Self {
        Self::new(
            "Separation",
            [OsString::from("separate"), input.into(), output.into()],
        )
        .writing_to(output)
    }

    /// `slice-audio-v2 --no-merge-short --min-duration <secs> <input> <output>`
    pub fn slice(input: &Path, output: &Path, min_duration: u32) -> Self {
        Self::new(
            "Slicing",
            [
                OsString::from("slice-audio-v2"),
                "--no-merge-short".into(),
                "--min-duration".into(),
                min_duration.to_string().into(),
                input.into(),
                output.into(),
            ],
        )
        .writing_to(output)
    }

    /// `transcribe --lang <lang> --recursive <dir>`, writing `.lab` files beside the audio.
    pub fn transcribe(dir: &Path, lang: &str) -> Self {
        Self::new(
            "Transcription",
            [
                OsString::from("transcribe"),
                "--lang".into(),
                lang.into(),
                "--recursive".into(),
                dir.into(),
            ],
        )
    }

    /// `soft-limit --dB <db> <dir>`, in place.
    pub fn soft_limit(dir: &Path, db: i32) -> Self {
        Self::new(
            "Soft Limiter",
            [
                OsString::from("soft-limit"),
                "--dB".into(),
                db.to_string().into(),
                dir.into(),
            ],
        )
    }

    /// `normalize-loudness <dir>`, in place.
    pub fn normalize_loudness(dir: &Path) -> Self {
        Self::new(
            "Loudness Normalization",
            [OsString::from("normalize-loudness"), dir.into()],
        )
    }
}

/// Why a stage did not succeed.
#[derive(Debug, Error)]
pub enum StageFailure {
    /// The program could not be started
    #[error("failed to spawn: {0}")]
    Spawn(#[source] std::io::Error),

    /// The program ran and exited with a non-zero status
    #[error("exited with status {0}")]
    Exit(i32),

    /// The program was killed by a signal
    #[error("terminated by signal")]
    Signaled,
}

/// Outcome of a stage that did not abort the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageStatus {
    Succeeded,
    Failed,
}

/// Executes stages. Implemented by [`Subprocess`]; tests substitute recorders.
pub trait StageExecutor {
    /// Run `program` with the stage's arguments and wait for it to finish.
    fn execute(&mut self, program: &Path, stage: &Stage) -> std::result::Result<(), StageFailure>;
}

/// Runs stages as blocking child processes inheriting stdio.
#[derive(Clone, Copy, Debug, Default)]
pub struct Subprocess;

impl StageExecutor for Subprocess {
    fn execute(&mut self, program: &Path, stage: &Stage) -> std::result::Result<(), StageFailure> {
        let status = Command::new(program)
            .args(&stage.args)
            .status()
            .map_err(StageFailure::Spawn)?;

        match status.code() {
            _ if status.success() => Ok(()),
            Some(code) => Err(StageFailure::Exit(code)),
            None => Err(StageFailure::Signaled),
        }
    }
}

/// Executes stages in order under one [`ToolConfig`].
#[derive(Debug)]
pub struct StageRunner<E = Subprocess> {
    config: ToolConfig,
    executor: E,
}

impl StageRunner<Subprocess> {
    pub fn new(config: ToolConfig) -> Self {
        Self::with_executor(config, Subprocess)
    }
}

impl<E: StageExecutor> StageRunner<E> {
    pub fn with_executor(config: ToolConfig, executor: E) -> Self {
        Self { config, executor }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run a stage synchronously.
    ///
    /// Failures are logged and never retried. Under [`FailurePolicy::Continue`]
    /// they come back as [`StageStatus::Failed`]; under [`FailurePolicy::Abort`]
    /// as [`Error::StageFailed`]. Only filesystem errors while preparing the
    /// output directory are returned regardless of policy.
    pub fn run(&mut self, stage: &Stage) -> Result<StageStatus> {
        if let Some(dir) = &stage.output_dir {
            std::fs::create_dir_all(dir)
                .map_err(|e| Error::io("failed to create stage output directory", dir, e))?;
        }

        tracing::info!(stage = stage.name, "running stage");
        tracing::debug!(program = ?self.config.program.display(), args = ?stage.args, "command");

        let Err(failure) = self.executor.execute(&self.config.program, stage) else {
            return Ok(StageStatus::Succeeded);
        };

        tracing::error!(stage = stage.name, error = %failure, "stage failed");

        match self.config.on_stage_failure {
            FailurePolicy::Continue => Ok(StageStatus::Failed),
            FailurePolicy::Abort => Err(Error::StageFailed {
                stage: stage.name.to_string(),
                reason: failure.to_string(),
            }),
        }
    }
}
