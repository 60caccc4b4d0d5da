//! Wavefront OBJ reading and writing for seam meshes.
//!
//! Supports the subset the pipeline needs:
//!
//! - `v x y z` vertex records
//! - `f i j k ...` polygon faces (1-based, `i/t/n` forms accepted,
//!   texture/normal references ignored)
//! - `l i j ...` polyline records, used to persist seam edges: every
//!   consecutive pair along an `l` record is registered as an edge and
//!   flagged as a seam
//!
//! Saving writes all vertices, the live faces, and one 2-vertex `l`
//! record per seam edge, so a save/load round trip preserves seam
//! flags.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::Point3;

use seam_types::SeamMesh;

use crate::error::{HostError, HostResult};

/// Load a mesh from an OBJ file.
///
/// # Errors
///
/// [`HostError::FileNotFound`] when the path does not exist, I/O
/// errors from reading, and [`HostError::InvalidContent`] or the parse
/// variants for malformed records.
pub fn load_obj(path: &Path) -> HostResult<SeamMesh> {
    if !path.is_file() {
        return Err(HostError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let reader = BufReader::new(File::open(path)?);
    let mut mesh = SeamMesh::new();
    // Seam polylines are applied after all faces so the edges they
    // flag are the deduplicated face edges where both exist.
    let mut seam_lines: Vec<Vec<u32>> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut fields = trimmed.split_whitespace();
        let Some(keyword) = fields.next() else {
            continue;
        };
        match keyword {
            "v" => {
                let coords = parse_coords(&mut fields, line_no)?;
                mesh.add_vertex(coords);
            }
            "f" => {
                let loop_ = parse_indices(&mut fields, line_no, mesh.vertex_count())?;
                if loop_.len() < 3 {
                    return Err(HostError::InvalidContent {
                        line: line_no,
                        message: format!("face with {} vertices", loop_.len()),
                    });
                }
                mesh.add_face(&loop_)?;
            }
            "l" => {
                let indices = parse_indices(&mut fields, line_no, mesh.vertex_count())?;
                if indices.len() < 2 {
                    return Err(HostError::InvalidContent {
                        line: line_no,
                        message: "polyline with fewer than 2 vertices".to_owned(),
                    });
                }
                seam_lines.push(indices);
            }
            // Ignore everything else (vn, vt, o, g, usemtl, s, ...).
            _ => {}
        }
    }

    for polyline in seam_lines {
        for pair in polyline.windows(2) {
            let edge = mesh.ensure_edge(pair[0], pair[1])?;
            mesh.set_seam(edge, true)?;
        }
    }

    Ok(mesh)
}

/// Save a mesh as an OBJ file, seam edges included.
///
/// # Errors
///
/// I/O errors from writing.
pub fn save_obj(mesh: &SeamMesh, path: &Path) -> HostResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "# seam toolkit mesh")?;
    writeln!(
        writer,
        "# {} vertices, {} faces, {} seam edges",
        mesh.vertex_count(),
        mesh.face_count(),
        mesh.seam_edge_count()
    )?;

    for (_, vertex) in mesh.vertices() {
        let p = vertex.position;
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for (_, face) in mesh.live_faces() {
        write!(writer, "f")?;
        for &v in face.vertices() {
            write!(writer, " {}", v + 1)?;
        }
        writeln!(writer)?;
    }
    for edge_index in mesh.seam_edges() {
        if let Some(edge) = mesh.edge(edge_index) {
            writeln!(writer, "l {} {}", edge.a + 1, edge.b + 1)?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn parse_coords<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    line_no: usize,
) -> HostResult<Point3<f64>> {
    let mut coords = [0.0f64; 3];
    for slot in &mut coords {
        let field = fields.next().ok_or_else(|| HostError::InvalidContent {
            line: line_no,
            message: "vertex with fewer than 3 coordinates".to_owned(),
        })?;
        *slot = field.parse()?;
    }
    Ok(Point3::new(coords[0], coords[1], coords[2]))
}

/// Parse 1-based `f`/`l` vertex references into 0-based indices.
#[allow(clippy::cast_possible_truncation)]
fn parse_indices<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    line_no: usize,
    vertex_count: usize,
) -> HostResult<Vec<u32>> {
    let mut indices = Vec::new();
    for field in fields {
        // `f 1/2/3` forms: the vertex reference is the first component.
        let vertex_ref = field.split('/').next().unwrap_or(field);
        let index: i64 = vertex_ref.parse()?;
        if index < 1 || index as usize > vertex_count {
            return Err(HostError::InvalidContent {
                line: line_no,
                message: format!("vertex reference {index} out of range"),
            });
        }
        indices.push((index - 1) as u32);
    }
    Ok(indices)
}
