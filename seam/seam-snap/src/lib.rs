//! Surface snapping for calibrated point sequences.
//!
//! Projects each point onto the nearest point of the indexed mesh
//! surface. A point with no surface within the search radius is a
//! *miss*: it keeps its original position and is counted, but never
//! aborts the run. Residuals above the caller's threshold are flagged
//! as diagnostics only.
//!
//! # Example
//!
//! ```
//! use seam_index::SurfaceIndex;
//! use seam_snap::{snap_points, SnapParams};
//! use seam_types::{unit_cube, Point3};
//!
//! let cube = unit_cube();
//! let index = SurfaceIndex::build(&cube).unwrap();
//!
//! let points = vec![Point3::new(0.5, 0.5, 1.3), Point3::new(0.5, 0.5, 1.0)];
//! let report = snap_points(&index, &points, &SnapParams::default());
//!
//! assert_eq!(report.missed, 0);
//! assert!((report.samples[0].snapped.z - 1.0).abs() < 1e-9);
//! // The second point was already on the surface.
//! assert_eq!(report.samples[1].snapped, points[1]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use nalgebra::Point3;
use tracing::info;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use seam_index::SurfaceIndex;

/// Parameters for surface snapping.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SnapParams {
    /// Maximum search radius for the nearest-surface query.
    pub max_snap_dist: f64,
    /// Residuals above this distance are flagged as over-threshold.
    pub dist_threshold: f64,
}

impl Default for SnapParams {
    fn default() -> Self {
        Self {
            max_snap_dist: 1000.0,
            dist_threshold: 0.001,
        }
    }
}

/// One point's snapping outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapSample {
    /// The (calibrated) input point.
    pub source: Point3<f64>,
    /// The snapped position; equals `source` on a miss.
    pub snapped: Point3<f64>,
    /// Distance moved by the snap; `None` on a miss.
    pub residual: Option<f64>,
    /// No surface point within the search radius.
    pub missed: bool,
    /// Residual exceeded the threshold (diagnostic only).
    pub over_threshold: bool,
}

/// Aggregate residual statistics over the points that hit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResidualStats {
    /// Smallest residual, `None` when nothing hit.
    pub min: Option<f64>,
    /// Largest residual, `None` when nothing hit.
    pub max: Option<f64>,
    /// Mean residual, `None` when nothing hit.
    pub mean: Option<f64>,
    /// Number of residuals the stats cover.
    pub count: usize,
}

impl ResidualStats {
    fn from_residuals(residuals: &[f64]) -> Self {
        if residuals.is_empty() {
            return Self::default();
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &r in residuals {
            min = min.min(r);
            max = max.max(r);
            sum += r;
        }
        #[allow(clippy::cast_precision_loss)]
        let mean = sum / residuals.len() as f64;
        Self {
            min: Some(min),
            max: Some(max),
            mean: Some(mean),
            count: residuals.len(),
        }
    }
}

/// Per-point outcomes plus aggregate diagnostics for one snap pass.
#[derive(Debug, Clone)]
pub struct SnapReport {
    /// Outcome for each input point, in order.
    pub samples: Vec<SnapSample>,
    /// Points with no surface hit within the radius.
    pub missed: usize,
    /// Points whose residual exceeded the threshold.
    pub over_threshold: usize,
    /// Residual statistics over the hits.
    pub stats: ResidualStats,
    /// A copy of the parameters the pass ran with.
    pub params: SnapParams,
}

impl SnapReport {
    /// The snapped point sequence, in input order.
    #[must_use]
    pub fn snapped_points(&self) -> Vec<Point3<f64>> {
        self.samples.iter().map(|s| s.snapped).collect()
    }
}

/// Snap every point onto the indexed surface.
///
/// Misses fall back to the unsnapped position and are counted; nothing
/// in this pass is fatal.
#[must_use]
pub fn snap_points(
    index: &SurfaceIndex,
    points: &[Point3<f64>],
    params: &SnapParams,
) -> SnapReport {
    let mut samples = Vec::with_capacity(points.len());
    let mut residuals = Vec::with_capacity(points.len());
    let mut missed = 0usize;
    let mut over_threshold = 0usize;

    for p in points {
        match index.nearest_surface_point(p, params.max_snap_dist) {
            Some(hit) => {
                let over = hit.distance > params.dist_threshold;
                if over {
                    over_threshold += 1;
                }
                residuals.push(hit.distance);
                samples.push(SnapSample {
                    source: *p,
                    snapped: hit.point,
                    residual: Some(hit.distance),
                    missed: false,
                    over_threshold: over,
                });
            }
            None => {
                missed += 1;
                samples.push(SnapSample {
                    source: *p,
                    snapped: *p,
                    residual: None,
                    missed: true,
                    over_threshold: false,
                });
            }
        }
    }

    let stats = ResidualStats::from_residuals(&residuals);
    info!(
        points = points.len(),
        missed,
        over_threshold,
        mean_residual = stats.mean,
        max_residual = stats.max,
        threshold = params.dist_threshold,
        "snapped points to surface"
    );

    SnapReport {
        samples,
        missed,
        over_threshold,
        stats,
        params: *params,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use seam_types::unit_cube;

    fn cube_index() -> SurfaceIndex {
        SurfaceIndex::build(&unit_cube()).unwrap()
    }

    #[test]
    fn on_surface_point_has_zero_residual() {
        let index = cube_index();
        let points = vec![Point3::new(0.5, 0.5, 1.0), Point3::new(1.0, 0.5, 0.5)];
        let report = snap_points(&index, &points, &SnapParams::default());

        assert_eq!(report.missed, 0);
        for (sample, p) in report.samples.iter().zip(&points) {
            assert_eq!(sample.snapped, *p);
            assert_abs_diff_eq!(sample.residual.unwrap(), 0.0, epsilon = 1e-12);
            assert!(!sample.over_threshold);
        }
        assert_abs_diff_eq!(report.stats.mean.unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn out_of_radius_point_misses_and_keeps_position() {
        let index = cube_index();
        let far = Point3::new(50.0, 0.5, 0.5);
        let near = Point3::new(0.5, 0.5, 1.2);
        let report = snap_points(
            &index,
            &[far, near],
            &SnapParams {
                max_snap_dist: 1.0,
                dist_threshold: 0.001,
            },
        );

        assert_eq!(report.missed, 1);
        assert!(report.samples[0].missed);
        assert_eq!(report.samples[0].snapped, far);
        assert!(report.samples[0].residual.is_none());

        assert!(!report.samples[1].missed);
        assert_relative_eq!(report.samples[1].snapped.z, 1.0, epsilon = 1e-9);
        // Stats cover only the hit.
        assert_eq!(report.stats.count, 1);
    }

    #[test]
    fn over_threshold_is_diagnostic_not_error() {
        let index = cube_index();
        let report = snap_points(
            &index,
            &[Point3::new(0.5, 0.5, 1.5)],
            &SnapParams {
                max_snap_dist: 1000.0,
                dist_threshold: 0.1,
            },
        );

        assert_eq!(report.missed, 0);
        assert_eq!(report.over_threshold, 1);
        assert!(report.samples[0].over_threshold);
    }

    #[test]
    fn all_missed_stats_are_empty() {
        let index = cube_index();
        let report = snap_points(
            &index,
            &[Point3::new(100.0, 100.0, 100.0)],
            &SnapParams {
                max_snap_dist: 1.0,
                dist_threshold: 0.001,
            },
        );
        assert_eq!(report.missed, 1);
        assert_eq!(report.stats.count, 0);
        assert!(report.stats.mean.is_none());
    }
}
