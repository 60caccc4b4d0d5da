//! Mesh-editing capability for the seam imprinting pipeline.
//!
//! The imprinting core mutates topology only through the [`MeshHost`]
//! trait: import, nearest queries, face splitting, shortest-path
//! vertex connection, seam flagging, and save. [`IndexedHost`] is the
//! in-process implementation over [`seam_types::SeamMesh`]; an
//! out-of-process bridge to an external editor can implement the same
//! trait without the core noticing.
//!
//! # Example
//!
//! ```
//! use seam_host::{IndexedHost, MeshHost};
//! use seam_types::{unit_cube, Point3};
//!
//! let mut host = IndexedHost::new();
//! let mut cube = unit_cube();
//!
//! // Connect two diagonal corners of the bottom quad and flag the
//! // path as a seam.
//! let path = host.connect_vertices(&mut cube, 0, 2).unwrap();
//! for edge in &path {
//!     host.set_seam(&mut cube, *edge, true).unwrap();
//! }
//! assert_eq!(cube.seam_edge_count(), path.len());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod connect;
mod error;
mod host;
mod obj;

pub use connect::shortest_edge_path;
pub use error::{HostError, HostResult};
pub use host::{IndexedHost, MeshHost};
pub use obj::{load_obj, save_obj};
