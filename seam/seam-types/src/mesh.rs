//! Mutable polygon mesh with seam-flagged edges.

use std::collections::HashMap;

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, MeshResult};
use crate::{Aabb, Triangle, Vertex};

/// A polygon face: an ordered loop of vertex indices.
///
/// A retired face stays in the arena (so face indices remain stable)
/// but is skipped by iteration and spatial queries.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Face {
    loop_: Vec<u32>,
    retired: bool,
}

impl Face {
    /// The ordered vertex-index loop.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[u32] {
        &self.loop_
    }

    /// Whether this face has been retired by a split.
    #[inline]
    #[must_use]
    pub const fn is_retired(&self) -> bool {
        self.retired
    }
}

/// An undirected edge between two vertices, carrying the seam flag.
///
/// Endpoints are stored normalized (`a < b`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    /// Lower endpoint index.
    pub a: u32,
    /// Upper endpoint index.
    pub b: u32,
    /// Whether this edge is part of a seam.
    pub seam: bool,
}

/// A mutable polygon mesh built on growable arenas.
///
/// Vertices and edges are append-only; faces can be retired but never
/// removed, so `u32` indices handed out by any operation stay valid
/// across arbitrary later mutation. Edges are deduplicated through an
/// internal lookup map keyed on normalized endpoint pairs.
#[derive(Debug, Clone, Default)]
pub struct SeamMesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    edges: Vec<Edge>,
    edge_lookup: HashMap<(u32, u32), u32>,
}

impl SeamMesh {
    /// Create an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with pre-allocated arenas.
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
            edges: Vec::with_capacity(face_count * 3),
            edge_lookup: HashMap::with_capacity(face_count * 3),
        }
    }

    // ------------------------------------------------------------------
    // Vertices
    // ------------------------------------------------------------------

    /// Append a vertex, returning its stable index.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_vertex(&mut self, position: Point3<f64>) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(Vertex::new(position));
        index
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get a vertex by index.
    #[inline]
    #[must_use]
    pub fn vertex(&self, index: u32) -> Option<&Vertex> {
        self.vertices.get(index as usize)
    }

    /// Iterate over all vertices with their indices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn vertices(&self) -> impl Iterator<Item = (u32, &Vertex)> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (i as u32, v))
    }

    // ------------------------------------------------------------------
    // Faces
    // ------------------------------------------------------------------

    /// Append a polygon face, registering its boundary edges.
    ///
    /// The loop must have at least 3 distinct vertex indices, all in
    /// range. Returns the stable face index.
    ///
    /// # Errors
    ///
    /// [`MeshError::DegenerateFace`] for loops shorter than 3 or with
    /// repeated vertices; [`MeshError::InvalidVertex`] for an index
    /// outside the vertex arena.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_face(&mut self, loop_: &[u32]) -> MeshResult<u32> {
        if loop_.len() < 3 {
            return Err(MeshError::DegenerateFace { len: loop_.len() });
        }
        for (i, &v) in loop_.iter().enumerate() {
            if v as usize >= self.vertices.len() {
                return Err(MeshError::InvalidVertex {
                    index: v,
                    vertex_count: self.vertices.len(),
                });
            }
            if loop_[..i].contains(&v) {
                return Err(MeshError::DegenerateFace { len: loop_.len() });
            }
        }

        for i in 0..loop_.len() {
            let a = loop_[i];
            let b = loop_[(i + 1) % loop_.len()];
            self.ensure_edge(a, b)?;
        }

        let index = self.faces.len() as u32;
        self.faces.push(Face {
            loop_: loop_.to_vec(),
            retired: false,
        });
        Ok(index)
    }

    /// Get a face by index (retired faces included).
    #[inline]
    #[must_use]
    pub fn face(&self, index: u32) -> Option<&Face> {
        self.faces.get(index as usize)
    }

    /// Number of live (non-retired) faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.iter().filter(|f| !f.retired).count()
    }

    /// Iterate over live faces with their indices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn live_faces(&self) -> impl Iterator<Item = (u32, &Face)> {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.retired)
            .map(|(i, f)| (i as u32, f))
    }

    /// Retire a face, keeping its arena slot.
    ///
    /// # Errors
    ///
    /// [`MeshError::InvalidFace`] if the index is out of range or the
    /// face is already retired.
    pub fn retire_face(&mut self, index: u32) -> MeshResult<()> {
        match self.faces.get_mut(index as usize) {
            Some(face) if !face.retired => {
                face.retired = true;
                Ok(())
            }
            _ => Err(MeshError::InvalidFace { index }),
        }
    }

    // ------------------------------------------------------------------
    // Edges
    // ------------------------------------------------------------------

    /// Find the edge between two vertices, if registered.
    #[must_use]
    pub fn edge_between(&self, a: u32, b: u32) -> Option<u32> {
        self.edge_lookup.get(&normalize(a, b)).copied()
    }

    /// Register the edge between two vertices, reusing an existing one.
    ///
    /// # Errors
    ///
    /// [`MeshError::DegenerateEdge`] when `a == b`;
    /// [`MeshError::InvalidVertex`] for an out-of-range endpoint.
    #[allow(clippy::cast_possible_truncation)]
    pub fn ensure_edge(&mut self, a: u32, b: u32) -> MeshResult<u32> {
        if a == b {
            return Err(MeshError::DegenerateEdge { vertex: a });
        }
        for v in [a, b] {
            if v as usize >= self.vertices.len() {
                return Err(MeshError::InvalidVertex {
                    index: v,
                    vertex_count: self.vertices.len(),
                });
            }
        }
        let key = normalize(a, b);
        if let Some(&index) = self.edge_lookup.get(&key) {
            return Ok(index);
        }
        let index = self.edges.len() as u32;
        self.edges.push(Edge {
            a: key.0,
            b: key.1,
            seam: false,
        });
        self.edge_lookup.insert(key, index);
        Ok(index)
    }

    /// Get an edge by index.
    #[inline]
    #[must_use]
    pub fn edge(&self, index: u32) -> Option<&Edge> {
        self.edges.get(index as usize)
    }

    /// Number of edges.
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterate over all edges with their indices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn edges(&self) -> impl Iterator<Item = (u32, &Edge)> {
        self.edges.iter().enumerate().map(|(i, e)| (i as u32, e))
    }

    /// Set or clear the seam flag on an edge.
    ///
    /// # Errors
    ///
    /// [`MeshError::InvalidEdge`] if the index is out of range.
    pub fn set_seam(&mut self, index: u32, seam: bool) -> MeshResult<()> {
        match self.edges.get_mut(index as usize) {
            Some(edge) => {
                edge.seam = seam;
                Ok(())
            }
            None => Err(MeshError::InvalidEdge { index }),
        }
    }

    /// Iterate over the indices of seam-flagged edges.
    pub fn seam_edges(&self) -> impl Iterator<Item = u32> + '_ {
        self.edges().filter(|(_, e)| e.seam).map(|(i, _)| i)
    }

    /// Number of seam-flagged edges.
    #[must_use]
    pub fn seam_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.seam).count()
    }

    // ------------------------------------------------------------------
    // Derived geometry
    // ------------------------------------------------------------------

    /// Whether the mesh has no vertices or no live faces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.face_count() == 0
    }

    /// Fan-triangulate the live faces for spatial queries.
    ///
    /// Each yielded triangle carries the index of the face it came
    /// from. Faces whose loops reference missing vertices are skipped;
    /// `add_face` makes that unreachable for meshes built through the
    /// public API.
    pub fn triangles(&self) -> impl Iterator<Item = (u32, Triangle)> + '_ {
        self.live_faces().flat_map(move |(face_index, face)| {
            let loop_ = face.vertices();
            (1..loop_.len().saturating_sub(1)).filter_map(move |i| {
                let v0 = self.vertex(loop_[0])?.position;
                let v1 = self.vertex(loop_[i])?.position;
                let v2 = self.vertex(loop_[i + 1])?.position;
                Some((face_index, Triangle::new(v0, v1, v2)))
            })
        })
    }

    /// Bounding box over all vertices.
    ///
    /// Returns an empty AABB for a vertex-less mesh.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        let mut aabb = Aabb::empty();
        for v in &self.vertices {
            aabb.include(&v.position);
        }
        aabb
    }
}

#[inline]
const fn normalize(a: u32, b: u32) -> (u32, u32) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Build the unit cube `[0,1]^3` as 8 vertices and 6 quad faces.
///
/// Quad loops wind counter-clockwise viewed from outside. Handy for
/// tests and demos; also exercises the polygon (non-triangle) face
/// path.
///
/// # Example
///
/// ```
/// use seam_types::unit_cube;
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.face_count(), 6);
/// assert_eq!(cube.edge_count(), 12);
/// ```
#[must_use]
#[allow(clippy::missing_panics_doc)]
pub fn unit_cube() -> SeamMesh {
    let mut mesh = SeamMesh::with_capacity(8, 6);
    let corners = [
        (0.0, 0.0, 0.0),
        (1.0, 0.0, 0.0),
        (1.0, 1.0, 0.0),
        (0.0, 1.0, 0.0),
        (0.0, 0.0, 1.0),
        (1.0, 0.0, 1.0),
        (1.0, 1.0, 1.0),
        (0.0, 1.0, 1.0),
    ];
    for (x, y, z) in corners {
        mesh.add_vertex(Point3::new(x, y, z));
    }
    let quads: [[u32; 4]; 6] = [
        [0, 3, 2, 1], // bottom (-z)
        [4, 5, 6, 7], // top (+z)
        [0, 1, 5, 4], // front (-y)
        [1, 2, 6, 5], // right (+x)
        [2, 3, 7, 6], // back (+y)
        [3, 0, 4, 7], // left (-x)
    ];
    for quad in &quads {
        // Indices are in range by construction.
        #[allow(clippy::unwrap_used)]
        mesh.add_face(quad).unwrap();
    }
    mesh
}
