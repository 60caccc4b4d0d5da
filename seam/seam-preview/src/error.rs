//! Error types for preview extraction.

use thiserror::Error;

/// Result type for preview operations.
pub type PreviewResult<T> = Result<T, PreviewError>;

/// Errors that can occur while extracting a seam preview.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// No edge in the source mesh carries the seam flag.
    #[error("mesh has no seam edges")]
    NoSeamEdges,
}
