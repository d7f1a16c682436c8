//! Toolkit invocation settings shared by both pipelines.

use std::path::PathBuf;

/// Default toolkit executable, resolved through `PATH`.
pub const DEFAULT_PROGRAM: &str = "fap";

/// Default transcription language
const DEFAULT_LANG: &str = "en";

/// Default minimum slice duration in seconds
const DEFAULT_MIN_DURATION: u32 = 3;

/// Default soft-limiter ceiling in dB
const DEFAULT_LIMIT_DB: i32 = -6;

/// What the pipeline does after an external stage fails.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure and run the next stage anyway
    #[default]
    Continue,
    /// Log the failure and end the run with an error
    Abort,
}

/// Configuration for external toolkit stages.
#[derive(clap::Args, Clone, Debug)]
pub struct ToolConfig {
    /// Path to the fap executable
    #[arg(long = "fap", env = "FAPMIX_FAP", default_value = DEFAULT_PROGRAM)]
    pub program: PathBuf,

    /// Behaviour after a stage exits non-zero
    #[arg(long, value_enum, default_value_t)]
    pub on_stage_failure: FailurePolicy,

    /// Transcription language
    #[arg(long, default_value = DEFAULT_LANG)]
    pub lang: String,

    /// Minimum slice duration in seconds
    #[arg(long, default_value_t = DEFAULT_MIN_DURATION)]
    pub min_duration: u32,

    /// Soft-limiter ceiling in dB
    #[arg(long, default_value_t = DEFAULT_LIMIT_DB, allow_hyphen_values = true)]
    pub limit_db: i32,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            on_stage_failure: FailurePolicy::default(),
            lang: DEFAULT_LANG.to_string(),
            min_duration: DEFAULT_MIN_DURATION,
            limit_db: DEFAULT_LIMIT_DB,
        }
    }
}

impl ToolConfig {
    /// Use a different toolkit executable.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Use a different failure policy.
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.on_stage_failure = policy;
        self
    }
}
