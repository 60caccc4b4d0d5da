//! Error types for mesh mutation.

use thiserror::Error;

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur while mutating a [`crate::SeamMesh`].
#[derive(Debug, Error)]
pub enum MeshError {
    /// A face loop referenced a vertex index outside the arena.
    #[error("invalid vertex index: {index} (mesh has {vertex_count} vertices)")]
    InvalidVertex {
        /// The offending index.
        index: u32,
        /// Number of vertices in the arena.
        vertex_count: usize,
    },

    /// A face loop with fewer than 3 vertices, or with duplicates.
    #[error("degenerate face loop of length {len}")]
    DegenerateFace {
        /// Length of the rejected loop.
        len: usize,
    },

    /// A face index outside the arena, or a retired face.
    #[error("invalid face index: {index}")]
    InvalidFace {
        /// The offending index.
        index: u32,
    },

    /// An edge index outside the arena.
    #[error("invalid edge index: {index}")]
    InvalidEdge {
        /// The offending index.
        index: u32,
    },

    /// An edge between a vertex and itself.
    #[error("degenerate edge: {vertex} -> {vertex}")]
    DegenerateEdge {
        /// The vertex at both endpoints.
        vertex: u32,
    },
}
