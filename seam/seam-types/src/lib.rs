//! Core types for the seam imprinting toolkit.
//!
//! This crate provides the foundational types shared by the seam crates:
//!
//! - [`Vertex`] - A point in 3D space
//! - [`SeamMesh`] - A mutable polygon mesh with seam-flagged edges
//! - [`Triangle`] - A concrete triangle with resolved vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Index Stability
//!
//! The mesh stores vertices, faces, and edges in growable arenas and
//! refers to them by `u32` index, never by pointer. Vertices and edges
//! are append-only. Faces are retired rather than removed, so every
//! index handed out stays valid while the topology is mutated mid-run
//! (a face split during imprinting inserts a vertex, retires one face,
//! and appends replacement faces).
//!
//! # Coordinate System
//!
//! All coordinates are `f64`. Face loops wind counter-clockwise when
//! viewed from outside, so normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use seam_types::{SeamMesh, Point3};
//!
//! let mut mesh = SeamMesh::new();
//! let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
//! let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
//! let c = mesh.add_vertex(Point3::new(0.5, 1.0, 0.0));
//! mesh.add_face(&[a, b, c]).unwrap();
//!
//! assert_eq!(mesh.vertex_count(), 3);
//! assert_eq!(mesh.face_count(), 1);
//! assert_eq!(mesh.edge_count(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod error;
mod mesh;
mod triangle;
mod vertex;

pub use bounds::Aabb;
pub use error::{MeshError, MeshResult};
pub use mesh::{unit_cube, Edge, Face, SeamMesh};
pub use triangle::Triangle;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
