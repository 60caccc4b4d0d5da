//! Error types for host primitives.

use std::path::PathBuf;
use thiserror::Error;

use seam_types::MeshError;

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;

/// Errors raised at the mesh-editing capability boundary.
///
/// Everything here is fatal for the run except
/// [`Unreachable`](Self::Unreachable), which the imprinter treats as a
/// per-segment soft failure.
#[derive(Debug, Error)]
pub enum HostError {
    /// Model file not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Unrecognized model file extension.
    #[error("unknown model format: .{extension}")]
    UnknownFormat {
        /// The unrecognized extension.
        extension: String,
    },

    /// Malformed model file content.
    #[error("invalid model content at line {line}: {message}")]
    InvalidContent {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        message: String,
    },

    /// The mesh has no vertices or faces to operate on.
    #[error("mesh is empty")]
    EmptyMesh,

    /// A primitive referenced a face that does not exist or is retired.
    #[error("no live face with index {face}")]
    InvalidFace {
        /// The offending face index.
        face: u32,
    },

    /// A primitive referenced an edge that does not exist.
    #[error("no edge with index {edge}")]
    InvalidEdge {
        /// The offending edge index.
        edge: u32,
    },

    /// A primitive referenced a vertex that does not exist.
    #[error("no vertex with index {vertex}")]
    InvalidVertex {
        /// The offending vertex index.
        vertex: u32,
    },

    /// No in-mesh path connects the two vertices.
    ///
    /// The soft connect failure: disconnected components make a seam
    /// segment impossible, but the remaining segments still run.
    #[error("no path connects vertex {v0} to vertex {v1}")]
    Unreachable {
        /// First endpoint.
        v0: u32,
        /// Second endpoint.
        v1: u32,
    },

    /// A mesh mutation primitive failed.
    #[error("mesh mutation failed: {0}")]
    Mesh(#[from] MeshError),

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Float parsing error in a model file.
    #[error("float parsing error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),

    /// Integer parsing error in a model file.
    #[error("integer parsing error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}
