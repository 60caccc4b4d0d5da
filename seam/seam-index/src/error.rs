//! Error types for spatial index construction.

use thiserror::Error;

/// Result type for index operations.
pub type IndexResult<T> = Result<T, IndexError>;

/// Errors that can occur while building a surface index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The mesh has no vertices or no live faces to index.
    #[error("mesh is empty")]
    EmptyMesh,
}
