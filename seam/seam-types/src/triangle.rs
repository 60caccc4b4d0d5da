//! Concrete triangle with resolved vertex positions.

use nalgebra::{Point3, Vector3};

use crate::Aabb;

/// A triangle with resolved vertex positions.
///
/// Produced by fan-triangulating the polygon faces of a
/// [`crate::SeamMesh`] for spatial queries; it does not reference the
/// mesh it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3<f64>,
    /// Second vertex.
    pub v1: Point3<f64>,
    /// Third vertex.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a triangle from three positions.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Unit normal by the right-hand rule.
    ///
    /// Returns `None` for degenerate (zero-area) triangles.
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        let n = (self.v1 - self.v0).cross(&(self.v2 - self.v0));
        let len = n.norm();
        if len < f64::EPSILON {
            None
        } else {
            Some(n / len)
        }
    }

    /// Bounding box of the triangle.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        let mut aabb = Aabb::from_point(self.v0);
        aabb.include(&self.v1);
        aabb.include(&self.v2);
        aabb
    }
}
