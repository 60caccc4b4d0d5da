//! Error types for topology imprinting.

use thiserror::Error;

use seam_host::HostError;

/// Result type for imprint operations.
pub type ImprintResult<T> = Result<T, ImprintError>;

/// Fatal imprint failures.
///
/// Per-point misses and unconnectable segments are not errors; they
/// accumulate as counters in [`crate::ImprintOutcome`].
#[derive(Debug, Error)]
pub enum ImprintError {
    /// The mesh has no faces to imprint into.
    #[error("mesh is empty")]
    EmptyMesh,

    /// A host primitive failed fatally.
    #[error("host primitive failed: {0}")]
    Host(#[from] HostError),
}
