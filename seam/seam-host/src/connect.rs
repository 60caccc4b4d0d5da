//! Shortest in-mesh vertex connection via Dijkstra on the edge graph.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use seam_types::SeamMesh;

use crate::error::{HostError, HostResult};

/// Priority queue entry: a vertex and its tentative distance.
#[derive(Debug, Clone, Copy)]
struct State {
    vertex: u32,
    distance: f64,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.vertex == other.vertex && (self.distance - other.distance).abs() < f64::EPSILON
    }
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the BinaryHeap pops the smallest distance first.
        other
            .distance
            .partial_cmp(&self.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-vertex neighbor list over the mesh's registered edges.
///
/// Entries are (neighbor vertex, edge index, edge length).
fn build_adjacency(mesh: &SeamMesh) -> Vec<Vec<(u32, u32, f64)>> {
    let mut neighbors: Vec<Vec<(u32, u32, f64)>> = vec![Vec::new(); mesh.vertex_count()];
    for (edge_index, edge) in mesh.edges() {
        let (Some(va), Some(vb)) = (mesh.vertex(edge.a), mesh.vertex(edge.b)) else {
            continue;
        };
        let length = (vb.position - va.position).norm();
        neighbors[edge.a as usize].push((edge.b, edge_index, length));
        neighbors[edge.b as usize].push((edge.a, edge_index, length));
    }
    neighbors
}

/// Find the shortest edge path between two vertices.
///
/// Returns the edge indices along the path from `v0` to `v1`, in
/// order. Edge weights are Euclidean lengths.
///
/// # Errors
///
/// [`HostError::InvalidVertex`] for an out-of-range endpoint;
/// [`HostError::Unreachable`] when the vertices lie in disconnected
/// components.
#[allow(clippy::cast_possible_truncation)]
pub fn shortest_edge_path(mesh: &SeamMesh, v0: u32, v1: u32) -> HostResult<Vec<u32>> {
    let vertex_count = mesh.vertex_count();
    for v in [v0, v1] {
        if v as usize >= vertex_count {
            return Err(HostError::InvalidVertex { vertex: v });
        }
    }
    if v0 == v1 {
        return Ok(Vec::new());
    }

    let adjacency = build_adjacency(mesh);
    let mut distances = vec![f64::INFINITY; vertex_count];
    // Predecessor as (previous vertex, edge taken to get here).
    let mut previous: Vec<Option<(u32, u32)>> = vec![None; vertex_count];
    let mut heap = BinaryHeap::new();

    distances[v0 as usize] = 0.0;
    heap.push(State {
        vertex: v0,
        distance: 0.0,
    });

    while let Some(State { vertex, distance }) = heap.pop() {
        if vertex == v1 {
            break;
        }
        if distance > distances[vertex as usize] {
            continue;
        }
        for &(neighbor, edge_index, length) in &adjacency[vertex as usize] {
            let next = distance + length;
            if next < distances[neighbor as usize] {
                distances[neighbor as usize] = next;
                previous[neighbor as usize] = Some((vertex, edge_index));
                heap.push(State {
                    vertex: neighbor,
                    distance: next,
                });
            }
        }
    }

    if distances[v1 as usize].is_infinite() {
        return Err(HostError::Unreachable { v0, v1 });
    }

    // Walk predecessors back to the start.
    let mut path = Vec::new();
    let mut cursor = v1;
    while cursor != v0 {
        let Some((prev, edge_index)) = previous[cursor as usize] else {
            return Err(HostError::Unreachable { v0, v1 });
        };
        path.push(edge_index);
        cursor = prev;
    }
    path.reverse();
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use seam_types::unit_cube;

    #[test]
    fn adjacent_corners_connect_directly() {
        let cube = unit_cube();
        let path = shortest_edge_path(&cube, 0, 1).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path[0], cube.edge_between(0, 1).unwrap());
    }

    #[test]
    fn face_diagonal_takes_two_edges() {
        let cube = unit_cube();
        // Corners 0 and 2 are diagonal on the bottom quad; the quad has
        // no diagonal edge, so the path goes through a shared corner.
        let path = shortest_edge_path(&cube, 0, 2).unwrap();
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn same_vertex_is_empty_path() {
        let cube = unit_cube();
        assert!(shortest_edge_path(&cube, 3, 3).unwrap().is_empty());
    }

    #[test]
    fn disconnected_components_are_unreachable() {
        let mut mesh = SeamMesh::new();
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)] {
            mesh.add_vertex(Point3::new(x, y, 0.0));
        }
        for (x, y) in [(10.0, 0.0), (11.0, 0.0), (10.0, 1.0)] {
            mesh.add_vertex(Point3::new(x, y, 0.0));
        }
        mesh.add_face(&[0, 1, 2]).unwrap();
        mesh.add_face(&[3, 4, 5]).unwrap();

        assert!(matches!(
            shortest_edge_path(&mesh, 0, 4),
            Err(HostError::Unreachable { v0: 0, v1: 4 })
        ));
    }

    #[test]
    fn out_of_range_vertex_is_invalid() {
        let cube = unit_cube();
        assert!(matches!(
            shortest_edge_path(&cube, 0, 99),
            Err(HostError::InvalidVertex { vertex: 99 })
        ));
    }
}
