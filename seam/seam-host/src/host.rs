//! The mesh-editing capability trait and its in-process implementation.

use std::path::Path;

use nalgebra::Point3;
use tracing::debug;

use seam_index::{nearest_vertex, SurfaceHit, SurfaceIndex};
use seam_types::SeamMesh;

use crate::connect::shortest_edge_path;
use crate::error::{HostError, HostResult};
use crate::obj::{load_obj, save_obj};

/// The mesh-editing capability the pipeline core depends on.
///
/// The core never assumes which implementation it talks to: the
/// in-process [`IndexedHost`] here, or an out-of-process bridge to an
/// external editor. Calls are synchronous blocking round-trips with no
/// partial results.
///
/// The two spatial queries have default implementations over
/// `seam-index`, so an in-process host gets them for free while a
/// remote host may override them with its own search structures.
pub trait MeshHost {
    /// Import a model file into a mesh.
    ///
    /// # Errors
    ///
    /// File and parse failures; see [`HostError`].
    fn import(&mut self, path: &Path) -> HostResult<SeamMesh>;

    /// Find the vertex nearest to a point on the current mesh state.
    ///
    /// # Errors
    ///
    /// [`HostError::EmptyMesh`] for a vertex-less mesh.
    fn nearest_vertex_index(&mut self, mesh: &SeamMesh, point: &Point3<f64>) -> HostResult<(u32, f64)> {
        nearest_vertex(mesh, point).ok_or(HostError::EmptyMesh)
    }

    /// Find the nearest surface point within `max_dist`, or `None`.
    ///
    /// # Errors
    ///
    /// [`HostError::EmptyMesh`] for a face-less mesh.
    fn nearest_surface_point(
        &mut self,
        mesh: &SeamMesh,
        point: &Point3<f64>,
        max_dist: f64,
    ) -> HostResult<Option<SurfaceHit>> {
        let index = SurfaceIndex::build(mesh).map_err(|_| HostError::EmptyMesh)?;
        Ok(index.nearest_surface_point(point, max_dist))
    }

    /// Split a face at a point on it, returning the new vertex index.
    ///
    /// # Errors
    ///
    /// [`HostError::InvalidFace`] when the face is missing or retired.
    fn split_face_at(
        &mut self,
        mesh: &mut SeamMesh,
        face: u32,
        point: Point3<f64>,
    ) -> HostResult<u32>;

    /// Create (or reuse) a shortest edge chain between two vertices.
    ///
    /// Returns the edge indices along the chain, in order, which may be
    /// empty when `v0 == v1`.
    ///
    /// # Errors
    ///
    /// [`HostError::Unreachable`] when no chain exists (soft for the
    /// imprinter); [`HostError::InvalidVertex`] for bad endpoints.
    fn connect_vertices(&mut self, mesh: &mut SeamMesh, v0: u32, v1: u32) -> HostResult<Vec<u32>>;

    /// Set or clear the seam flag on an edge.
    ///
    /// # Errors
    ///
    /// [`HostError::InvalidEdge`] for an unknown edge index.
    fn set_seam(&mut self, mesh: &mut SeamMesh, edge: u32, seam: bool) -> HostResult<()>;

    /// Save the mesh to a model file.
    ///
    /// # Errors
    ///
    /// I/O failures; see [`HostError`].
    fn save(&mut self, mesh: &SeamMesh, path: &Path) -> HostResult<()>;
}

/// In-process host over the indexed mesh library.
///
/// Speaks Wavefront OBJ on disk (with seam edges persisted as `l`
/// records) and implements face splitting and vertex connection
/// directly on [`SeamMesh`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexedHost;

impl IndexedHost {
    /// Create a new in-process host.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl MeshHost for IndexedHost {
    fn import(&mut self, path: &Path) -> HostResult<SeamMesh> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if extension != "obj" {
            return Err(HostError::UnknownFormat { extension });
        }
        let mesh = load_obj(path)?;
        debug!(
            path = %path.display(),
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "imported model"
        );
        Ok(mesh)
    }

    fn split_face_at(
        &mut self,
        mesh: &mut SeamMesh,
        face: u32,
        point: Point3<f64>,
    ) -> HostResult<u32> {
        let loop_ = match mesh.face(face) {
            Some(f) if !f.is_retired() => f.vertices().to_vec(),
            _ => return Err(HostError::InvalidFace { face }),
        };

        // Poke: retire the face, drop a vertex at the point, and re-fan
        // the loop into triangles around it.
        mesh.retire_face(face)?;
        let center = mesh.add_vertex(point);
        for i in 0..loop_.len() {
            let a = loop_[i];
            let b = loop_[(i + 1) % loop_.len()];
            mesh.add_face(&[a, b, center])?;
        }
        debug!(face, vertex = center, fan = loop_.len(), "split face");
        Ok(center)
    }

    fn connect_vertices(&mut self, mesh: &mut SeamMesh, v0: u32, v1: u32) -> HostResult<Vec<u32>> {
        shortest_edge_path(mesh, v0, v1)
    }

    fn set_seam(&mut self, mesh: &mut SeamMesh, edge: u32, seam: bool) -> HostResult<()> {
        mesh.set_seam(edge, seam)
            .map_err(|_| HostError::InvalidEdge { edge })
    }

    fn save(&mut self, mesh: &SeamMesh, path: &Path) -> HostResult<()> {
        save_obj(mesh, path)
    }
}
