//! Error types for fapmix-pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Pipeline error variants.
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem bookkeeping failed
    #[error("{context}: {}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Archive writing failed
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),

    /// External stage failed under [`FailurePolicy::Abort`](crate::config::FailurePolicy::Abort)
    #[error("stage {stage:?} failed: {reason}")]
    StageFailed { stage: String, reason: String },

    /// Media download failed
    #[error("failed to download {url}: {reason}")]
    Download { url: String, reason: String },

    /// Required node input missing or malformed
    #[error("missing input: {0}")]
    MissingInput(String),
}

impl Error {
    /// Wrap an IO error with the operation and path it concerned.
    pub fn io(context: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            context,
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for fapmix-pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
