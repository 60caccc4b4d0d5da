//! Spatial acceleration for the seam imprinting pipeline.
//!
//! Wraps a [`SeamMesh`] in a bounding volume hierarchy supporting
//! nearest-surface-point queries, and provides an always-fresh
//! nearest-vertex scan:
//!
//! - [`SurfaceIndex::nearest_surface_point`] - closest point on any
//!   live face within a search radius
//! - [`nearest_vertex`] - closest mesh vertex to a query point
//!
//! # Rebuild Discipline
//!
//! The BVH snapshots the mesh's triangulated faces at build time.
//! Callers that mutate topology (the imprinter splits faces mid-run)
//! must rebuild the index before the next surface query. The vertex
//! query takes the mesh directly and scans the live arena, so it can
//! never observe stale vertices.
//!
//! # Example
//!
//! ```
//! use seam_index::SurfaceIndex;
//! use seam_types::{unit_cube, Point3};
//!
//! let cube = unit_cube();
//! let index = SurfaceIndex::build(&cube).unwrap();
//!
//! let hit = index
//!     .nearest_surface_point(&Point3::new(0.5, 0.5, 2.0), 10.0)
//!     .unwrap();
//! assert!((hit.point.z - 1.0).abs() < 1e-9);
//! assert!((hit.distance - 1.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bvh;
mod error;
mod query;

pub use error::{IndexError, IndexResult};
pub use query::closest_point_on_triangle;

use nalgebra::Point3;

use seam_types::{SeamMesh, Triangle};

use crate::bvh::BvhNode;

/// A nearest-surface-point query result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// The closest point on the mesh surface.
    pub point: Point3<f64>,
    /// Index of the live face the point lies on.
    pub face: u32,
    /// Euclidean distance from the query point.
    pub distance: f64,
}

/// A BVH over the triangulated live faces of a mesh.
///
/// Built once per topology state; see the crate docs for the rebuild
/// discipline.
#[derive(Debug)]
pub struct SurfaceIndex {
    triangles: Vec<Triangle>,
    faces: Vec<u32>,
    root: BvhNode,
}

impl SurfaceIndex {
    /// Build an index over the mesh's current live faces.
    ///
    /// # Errors
    ///
    /// [`IndexError::EmptyMesh`] when the mesh has no vertices or no
    /// live faces.
    pub fn build(mesh: &SeamMesh) -> IndexResult<Self> {
        let mut triangles = Vec::new();
        let mut faces = Vec::new();
        for (face_index, tri) in mesh.triangles() {
            triangles.push(tri);
            faces.push(face_index);
        }
        if triangles.is_empty() {
            return Err(IndexError::EmptyMesh);
        }

        let mut indices: Vec<usize> = (0..triangles.len()).collect();
        let root = BvhNode::build(&triangles, &mut indices).ok_or(IndexError::EmptyMesh)?;

        Ok(Self {
            triangles,
            faces,
            root,
        })
    }

    /// Number of triangles in the index.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Find the nearest point on the indexed surface within `max_dist`.
    ///
    /// Returns `None` when no surface point lies within the radius.
    #[must_use]
    pub fn nearest_surface_point(&self, point: &Point3<f64>, max_dist: f64) -> Option<SurfaceHit> {
        if max_dist < 0.0 {
            return None;
        }
        let mut best = None;
        self.root
            .nearest(&self.triangles, point, &mut best, max_dist * max_dist);
        best.map(|candidate| SurfaceHit {
            point: candidate.point,
            face: self.faces[candidate.tri_index],
            distance: candidate.distance_squared.sqrt(),
        })
    }
}

/// Find the mesh vertex nearest to a query point.
///
/// Scans the live vertex arena directly, so the answer always reflects
/// vertices inserted by earlier topology edits. Returns `None` for a
/// vertex-less mesh.
#[must_use]
pub fn nearest_vertex(mesh: &SeamMesh, point: &Point3<f64>) -> Option<(u32, f64)> {
    let mut best: Option<(u32, f64)> = None;
    for (index, vertex) in mesh.vertices() {
        let d2 = (vertex.position - point).norm_squared();
        if best.map_or(true, |(_, bd2)| d2 < bd2) {
            best = Some((index, d2));
        }
    }
    best.map(|(index, d2)| (index, d2.sqrt()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use seam_types::unit_cube;

    #[test]
    fn empty_mesh_fails() {
        let mesh = SeamMesh::new();
        assert!(matches!(
            SurfaceIndex::build(&mesh),
            Err(IndexError::EmptyMesh)
        ));
    }

    #[test]
    fn nearest_point_on_cube_face() {
        let cube = unit_cube();
        let index = SurfaceIndex::build(&cube).unwrap();
        assert_eq!(index.triangle_count(), 12);

        let hit = index
            .nearest_surface_point(&Point3::new(2.0, 0.5, 0.5), 10.0)
            .unwrap();
        assert_relative_eq!(hit.point.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(hit.distance, 1.0, epsilon = 1e-9);
        // Face 3 is the +x quad.
        assert_eq!(hit.face, 3);
    }

    #[test]
    fn point_on_surface_has_zero_distance() {
        let cube = unit_cube();
        let index = SurfaceIndex::build(&cube).unwrap();

        let on_surface = Point3::new(0.5, 0.5, 1.0);
        let hit = index.nearest_surface_point(&on_surface, 10.0).unwrap();
        assert_abs_diff_eq!(hit.distance, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!((hit.point - on_surface).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn radius_limits_search() {
        let cube = unit_cube();
        let index = SurfaceIndex::build(&cube).unwrap();

        let far = Point3::new(100.0, 0.5, 0.5);
        assert!(index.nearest_surface_point(&far, 10.0).is_none());
        assert!(index.nearest_surface_point(&far, 100.0).is_some());
    }

    #[test]
    fn nearest_vertex_finds_corner() {
        let cube = unit_cube();
        let (index, dist) = nearest_vertex(&cube, &Point3::new(-0.1, -0.1, -0.1)).unwrap();
        assert_eq!(index, 0);
        assert_relative_eq!(dist, 0.03_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn nearest_vertex_sees_inserted_vertices() {
        let mut cube = unit_cube();
        let query = Point3::new(0.5, 0.5, 1.0);
        let (before, _) = nearest_vertex(&cube, &query).unwrap();
        assert!(before < 8);

        let inserted = cube.add_vertex(query);
        let (after, dist) = nearest_vertex(&cube, &query).unwrap();
        assert_eq!(after, inserted);
        assert_abs_diff_eq!(dist, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn nearest_vertex_on_empty_mesh() {
        let mesh = SeamMesh::new();
        assert!(nearest_vertex(&mesh, &Point3::origin()).is_none());
    }
}
