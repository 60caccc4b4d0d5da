//! Topology imprinting: turn a point sequence into a connected seam.
//!
//! Each point resolves to a mesh vertex in one of three ways, tried in
//! order:
//!
//! 1. **Reuse** - the nearest existing vertex lies within `ε`
//! 2. **Insert** - the nearest surface point within the search radius
//!    lands on a face, which is split there
//! 3. **Miss** - no surface within range; the point is skipped and the
//!    chain breaks at that position
//!
//! Consecutive resolved vertices are then connected through the host's
//! shortest-path primitive, and every edge along each path is flagged
//! as a seam. A gap left by a miss is never bridged: the points on
//! either side of it belong to separate chain runs. A segment whose
//! endpoints cannot be connected (disconnected components) is counted
//! and skipped; it never aborts the remaining segments.
//!
//! The nearest-vertex query is issued against the current mesh state
//! on every iteration, so points can snap to vertices inserted by
//! earlier iterations. All counters are deterministic for identical
//! inputs.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;

pub use error::{ImprintError, ImprintResult};

use nalgebra::Point3;
use tracing::{debug, info, warn};

use seam_host::{HostError, MeshHost};
use seam_types::SeamMesh;

/// Parameters for topology imprinting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImprintParams {
    /// Points within this distance of an existing vertex reuse it.
    pub vertex_snap_eps: f64,
    /// Maximum search radius for the face projection query.
    pub max_snap_dist: f64,
}

impl Default for ImprintParams {
    fn default() -> Self {
        Self {
            vertex_snap_eps: 1e-6,
            max_snap_dist: 1000.0,
        }
    }
}

/// Counters and seam edges produced by one imprint run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImprintOutcome {
    /// Points resolved to an existing vertex.
    pub reused: usize,
    /// Points inserted by splitting a face.
    pub inserted: usize,
    /// Points with no surface within range; each breaks the chain.
    pub missed: usize,
    /// Consecutive pairs that could not be connected.
    pub connect_failed: usize,
    /// Indices of every edge flagged as a seam, deduplicated, in the
    /// order first flagged.
    pub seam_edges: Vec<u32>,
}

impl ImprintOutcome {
    /// Total seam edges produced.
    #[must_use]
    pub fn seam_edge_count(&self) -> usize {
        self.seam_edges.len()
    }
}

/// Imprint a point sequence into the mesh as seam edges.
///
/// Mutates `mesh` in place through `host` primitives only. Soft
/// failures (misses, unconnectable segments) accumulate in the
/// returned [`ImprintOutcome`]; every other host failure is fatal.
///
/// # Errors
///
/// [`ImprintError::EmptyMesh`] when the mesh has no faces to imprint
/// into; [`ImprintError::Host`] for fatal host primitive failures.
pub fn imprint_seam(
    host: &mut dyn MeshHost,
    mesh: &mut SeamMesh,
    points: &[Point3<f64>],
    params: &ImprintParams,
) -> ImprintResult<ImprintOutcome> {
    if mesh.is_empty() {
        return Err(ImprintError::EmptyMesh);
    }

    let mut outcome = ImprintOutcome::default();
    // One slot per input point; None marks a chain-breaking miss.
    let mut resolved: Vec<Option<u32>> = Vec::with_capacity(points.len());

    for (i, point) in points.iter().enumerate() {
        // Fresh query each iteration: earlier splits add vertices.
        let (vertex, distance) = host.nearest_vertex_index(mesh, point)?;
        if distance <= params.vertex_snap_eps {
            debug!(point = i, vertex, distance, "reused existing vertex");
            resolved.push(Some(vertex));
            outcome.reused += 1;
            continue;
        }

        match host.nearest_surface_point(mesh, point, params.max_snap_dist)? {
            Some(hit) => {
                let vertex = host.split_face_at(mesh, hit.face, hit.point)?;
                debug!(point = i, vertex, face = hit.face, "inserted vertex by face split");
                resolved.push(Some(vertex));
                outcome.inserted += 1;
            }
            None => {
                warn!(point = i, "no surface within range, chain breaks here");
                resolved.push(None);
                outcome.missed += 1;
            }
        }
    }

    // Seen-set keeps seam_edges deduplicated while preserving the
    // order edges were first flagged.
    let mut flagged = std::collections::HashSet::new();
    for pair in resolved.windows(2) {
        let (Some(v0), Some(v1)) = (pair[0], pair[1]) else {
            continue;
        };
        if v0 == v1 {
            continue;
        }
        match host.connect_vertices(mesh, v0, v1) {
            Ok(edges) => {
                if edges.is_empty() {
                    outcome.connect_failed += 1;
                    continue;
                }
                for edge in edges {
                    host.set_seam(mesh, edge, true)?;
                    if flagged.insert(edge) {
                        outcome.seam_edges.push(edge);
                    }
                }
            }
            Err(HostError::Unreachable { .. }) => {
                warn!(v0, v1, "segment endpoints unreachable, skipping");
                outcome.connect_failed += 1;
            }
            Err(other) => return Err(other.into()),
        }
    }

    info!(
        points = points.len(),
        inserted = outcome.inserted,
        reused = outcome.reused,
        missed = outcome.missed,
        connect_failed = outcome.connect_failed,
        seam_edges = outcome.seam_edges.len(),
        "imprint complete"
    );
    Ok(outcome)
}
