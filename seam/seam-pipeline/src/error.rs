//! Error types for pipeline runs.

use std::path::PathBuf;
use thiserror::Error;

use seam_host::HostError;
use seam_imprint::ImprintError;
use seam_index::IndexError;
use seam_preview::PreviewError;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors that abort a pipeline run.
///
/// Every variant is fatal; soft conditions (snap misses, unconnectable
/// segments) accumulate in counters instead of surfacing here.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Point payload file not found.
    #[error("points file not found: {path}")]
    PointsFileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// The point payload holds fewer than two points.
    #[error("point payload has {count} points, need at least 2")]
    TooFewPoints {
        /// Number of points that were present.
        count: usize,
    },

    /// The wall-clock budget ran out between stages.
    #[error("run exceeded its budget of {budget_secs} s")]
    Timeout {
        /// The budget that was exhausted.
        budget_secs: u64,
    },

    /// Surface index construction failed.
    #[error(transparent)]
    Index(#[from] IndexError),

    /// A host primitive failed fatally.
    #[error(transparent)]
    Host(#[from] HostError),

    /// Imprinting failed fatally.
    #[error(transparent)]
    Imprint(#[from] ImprintError),

    /// Preview extraction failed.
    #[error(transparent)]
    Preview(#[from] PreviewError),

    /// Malformed JSON payload or report serialization failure.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem failure while reading inputs or writing artifacts.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
