//! Seam imprinting toolkit.
//!
//! This umbrella crate re-exports all seam-* crates, providing a
//! unified API for turning an externally drawn point sequence into a
//! seam imprinted in mesh topology.
//!
//! # Quick Start
//!
//! ```no_run
//! use seam::prelude::*;
//!
//! let mut host = IndexedHost::new();
//! let request = SeamRequest::new("model.obj", "points.json");
//! let summary = seam::pipeline::run(
//!     &mut host,
//!     &request,
//!     std::path::Path::new("out"),
//!     &mut TracingSink,
//! )
//! .unwrap();
//!
//! if let Some(outcome) = summary.imprint {
//!     println!("seam edges: {}", outcome.seam_edge_count());
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Core data structures: `SeamMesh`, `Vertex`, `Edge`, `Aabb`
//! - [`index`] - BVH surface index and nearest-point queries
//! - [`calibrate`] - Axis/origin disambiguation against the mesh
//! - [`snap`] - Surface snapping with residual diagnostics
//! - [`host`] - The mesh-editing capability trait, OBJ I/O, shortest paths
//! - [`imprint`] - Topology imprinting of point chains as seam edges
//! - [`preview`] - Line-only wireframe extraction of seam edges
//! - [`pipeline`] - End-to-end runs: requests, progress, artifacts, report

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

/// Core data structures: `SeamMesh`, `Vertex`, `Edge`, `Aabb`.
pub use seam_types as types;

/// BVH surface index and nearest-point queries.
pub use seam_index as index;

/// Axis/origin disambiguation against the mesh.
pub use seam_calibrate as calibrate;

/// Surface snapping with residual diagnostics.
pub use seam_snap as snap;

/// Mesh-editing capability trait, OBJ I/O, shortest paths.
pub use seam_host as host;

/// Topology imprinting of point chains as seam edges.
pub use seam_imprint as imprint;

/// Line-only wireframe extraction of seam edges.
pub use seam_preview as preview;

/// End-to-end runs: requests, progress, artifacts, report.
pub use seam_pipeline as pipeline;

/// Common imports for seam processing.
///
/// # Usage
///
/// ```
/// use seam::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use seam_types::{Aabb, Point3, SeamMesh, Triangle, Vector3, Vertex};

    // Spatial queries
    pub use seam_index::{SurfaceHit, SurfaceIndex};

    // Calibration
    pub use seam_calibrate::{calibrate, AxisRemap, AxisSpec, Calibration, OriginPolicy, OriginSpec};

    // Snapping
    pub use seam_snap::{snap_points, SnapParams, SnapReport};

    // Host capability
    pub use seam_host::{IndexedHost, MeshHost};

    // Imprinting
    pub use seam_imprint::{imprint_seam, ImprintOutcome, ImprintParams};

    // Preview
    pub use seam_preview::extract_preview;

    // Pipeline
    pub use seam_pipeline::{run, ProgressSink, RunSummary, SeamRequest, TracingSink};
}
