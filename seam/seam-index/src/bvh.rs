//! Bounding volume hierarchy for nearest-surface-point queries.

use nalgebra::Point3;

use seam_types::{Aabb, Triangle};

use crate::query::closest_point_on_triangle;

/// Padding applied to node bounds for numerical robustness.
const AABB_EPSILON: f64 = 1e-9;

/// A BVH node over indexed triangles.
#[derive(Debug)]
pub(crate) enum BvhNode {
    Leaf {
        aabb: Aabb,
        tri_index: usize,
    },
    Internal {
        aabb: Aabb,
        left: Box<BvhNode>,
        right: Box<BvhNode>,
    },
}

/// Running best candidate during branch-and-bound search.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NearestCandidate {
    pub point: Point3<f64>,
    pub tri_index: usize,
    pub distance_squared: f64,
}

impl BvhNode {
    /// Build a BVH over the given triangles by median split on the
    /// longest axis. Returns `None` for an empty set.
    pub(crate) fn build(triangles: &[Triangle], indices: &mut [usize]) -> Option<Self> {
        if indices.is_empty() {
            return None;
        }

        if indices.len() == 1 {
            let idx = indices[0];
            return Some(Self::Leaf {
                aabb: triangles[idx].bounds().expand(AABB_EPSILON),
                tri_index: idx,
            });
        }

        let mut combined = Aabb::empty();
        for &idx in indices.iter() {
            let b = triangles[idx].bounds();
            combined.include(&b.min);
            combined.include(&b.max);
        }
        let combined = combined.expand(AABB_EPSILON);

        // Longest extent picks the split axis.
        let extent = combined.size();
        let axis = if extent.x >= extent.y && extent.x >= extent.z {
            0
        } else if extent.y >= extent.z {
            1
        } else {
            2
        };

        let centroid = |tri: &Triangle| (tri.v0.coords + tri.v1.coords + tri.v2.coords) / 3.0;
        indices.sort_by(|&a, &b| {
            let ca = centroid(&triangles[a])[axis];
            let cb = centroid(&triangles[b])[axis];
            ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mid = indices.len() / 2;
        let (left_indices, right_indices) = indices.split_at_mut(mid);
        let left = Self::build(triangles, left_indices)?;
        let right = Self::build(triangles, right_indices)?;

        Some(Self::Internal {
            aabb: combined,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn aabb(&self) -> &Aabb {
        match self {
            Self::Leaf { aabb, .. } | Self::Internal { aabb, .. } => aabb,
        }
    }

    /// Branch-and-bound nearest-point search.
    ///
    /// `best.distance_squared` starts at the squared search radius, so
    /// whole subtrees farther than the current best (or the radius)
    /// are pruned.
    pub(crate) fn nearest(
        &self,
        triangles: &[Triangle],
        point: &Point3<f64>,
        best: &mut Option<NearestCandidate>,
        limit_squared: f64,
    ) {
        let bound = best.map_or(limit_squared, |b| b.distance_squared);
        if self.aabb().distance_squared(point) > bound {
            return;
        }

        match self {
            Self::Leaf { tri_index, .. } => {
                let tri = &triangles[*tri_index];
                let candidate = closest_point_on_triangle(*point, tri.v0, tri.v1, tri.v2);
                let d2 = (candidate - point).norm_squared();
                let improved = match best {
                    None => d2 <= limit_squared,
                    Some(b) => d2 < b.distance_squared,
                };
                if improved {
                    *best = Some(NearestCandidate {
                        point: candidate,
                        tri_index: *tri_index,
                        distance_squared: d2,
                    });
                }
            }
            Self::Internal { left, right, .. } => {
                // Descend into the nearer child first to tighten the
                // bound before visiting the other.
                let dl = left.aabb().distance_squared(point);
                let dr = right.aabb().distance_squared(point);
                if dl <= dr {
                    left.nearest(triangles, point, best, limit_squared);
                    right.nearest(triangles, point, best, limit_squared);
                } else {
                    right.nearest(triangles, point, best, limit_squared);
                    left.nearest(triangles, point, best, limit_squared);
                }
            }
        }
    }
}
