//! Seam preview extraction.
//!
//! Builds a standalone line-only mesh from the seam-flagged edges of a
//! source mesh: only the vertices those edges reference, deduplicated
//! and re-indexed, with one seam edge per source edge and world
//! positions preserved. The source mesh is never mutated; the preview
//! exists purely for inspection and rendering.
//!
//! # Example
//!
//! ```
//! use seam_preview::extract_preview;
//! use seam_types::unit_cube;
//!
//! let mut cube = unit_cube();
//! let edge = cube.edge_between(0, 1).unwrap();
//! cube.set_seam(edge, true).unwrap();
//!
//! let preview = extract_preview(&cube).unwrap();
//! assert_eq!(preview.vertex_count(), 2);
//! assert_eq!(preview.edge_count(), 1);
//! assert_eq!(preview.face_count(), 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;

pub use error::{PreviewError, PreviewResult};

use std::collections::HashMap;

use seam_types::SeamMesh;

/// Build a line-only mesh containing exactly the seam-flagged edges.
///
/// The preview's edges keep their seam flags so a host save persists
/// them as line records.
///
/// # Errors
///
/// [`PreviewError::NoSeamEdges`] when no edge in the source mesh is
/// flagged.
pub fn extract_preview(mesh: &SeamMesh) -> PreviewResult<SeamMesh> {
    let mut preview = SeamMesh::new();
    let mut remap: HashMap<u32, u32> = HashMap::new();
    let mut extracted = 0usize;

    for edge_index in mesh.seam_edges() {
        let Some(edge) = mesh.edge(edge_index) else {
            continue;
        };
        let mut resolve = |old: u32, preview: &mut SeamMesh| -> Option<u32> {
            if let Some(&new) = remap.get(&old) {
                return Some(new);
            }
            let position = mesh.vertex(old)?.position;
            let new = preview.add_vertex(position);
            remap.insert(old, new);
            Some(new)
        };
        let (Some(a), Some(b)) = (resolve(edge.a, &mut preview), resolve(edge.b, &mut preview))
        else {
            continue;
        };
        if let Ok(new_edge) = preview.ensure_edge(a, b) {
            let _ = preview.set_seam(new_edge, true);
            extracted += 1;
        }
    }

    if extracted == 0 {
        return Err(PreviewError::NoSeamEdges);
    }
    Ok(preview)
}
