//! The calibration/snap report and artifact descriptors.
//!
//! The report is the run's audit trail: which frame won, how well the
//! points fit before snapping, and the snapped coordinates themselves.
//! Its wire shape is versioned and kept stable so downstream consumers
//! can parse reports from older runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use seam_calibrate::{AxisRemap, Calibration, OriginPolicy};
use seam_snap::{ResidualStats, SnapReport};

use crate::error::PipelineResult;
use crate::points::PointRecord;
use crate::request::SeamRequest;

/// Current report schema version.
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// The input files the run consumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSection {
    /// Model file path as given in the request.
    pub model: String,
    /// Point payload path as given in the request.
    pub points_json: String,
}

/// The winning calibration and its evaluation metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChosenSection {
    /// The winning axis remap.
    pub axis: AxisRemap,
    /// The winning origin policy.
    pub points_origin: OriginPolicy,
    /// Bounding-box centre the origin policy translated by.
    pub bbox_center_world: [f64; 3],
    /// Mean nearest-surface distance of the winning candidate.
    ///
    /// Serialized as `null` when the identity fallback stood unscored.
    pub mean_dist_before_eval: Option<f64>,
    /// Points the winning candidate missed during evaluation.
    pub missed_eval: usize,
}

/// Count wrapper for points whose residual exceeded the threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OverThresholdSection {
    /// Number of over-threshold points.
    pub count: usize,
}

/// The snap pass: parameters, misses, and residual statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapSection {
    /// Search radius the pass ran with.
    pub max_snap_dist: f64,
    /// Residual threshold the pass ran with.
    pub dist_threshold: f64,
    /// Points with no surface hit within the radius.
    pub missed: usize,
    /// Residual statistics over the hits, measured before snapping.
    pub stats_before: ResidualStats,
    /// Points whose residual exceeded the threshold.
    pub over_threshold: OverThresholdSection,
}

/// The full calibration/snap report document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapReportDoc {
    /// Wire schema version, currently [`REPORT_SCHEMA_VERSION`].
    pub schema_version: u32,
    /// The input files.
    pub input: InputSection,
    /// The winning calibration.
    pub chosen: ChosenSection,
    /// The snap pass.
    pub snap: SnapSection,
    /// Snapped coordinates, in input order. Misses keep their
    /// unsnapped position.
    pub points: Vec<PointRecord>,
}

/// Assemble the report from a run's calibration and snap results.
#[must_use]
pub fn build_report(
    request: &SeamRequest,
    calibration: &Calibration,
    snap: &SnapReport,
) -> SnapReportDoc {
    let c = calibration.bbox_center;
    SnapReportDoc {
        schema_version: REPORT_SCHEMA_VERSION,
        input: InputSection {
            model: request.model.display().to_string(),
            points_json: request.points.display().to_string(),
        },
        chosen: ChosenSection {
            axis: calibration.axis,
            points_origin: calibration.origin,
            bbox_center_world: [c.x, c.y, c.z],
            mean_dist_before_eval: calibration
                .mean_distance
                .is_finite()
                .then_some(calibration.mean_distance),
            missed_eval: calibration.missed,
        },
        snap: SnapSection {
            max_snap_dist: snap.params.max_snap_dist,
            dist_threshold: snap.params.dist_threshold,
            missed: snap.missed,
            stats_before: snap.stats,
            over_threshold: OverThresholdSection {
                count: snap.over_threshold,
            },
        },
        points: snap.samples.iter().map(|s| s.snapped.into()).collect(),
    }
}

/// Write the report as pretty-printed JSON.
///
/// # Errors
///
/// Serialization and filesystem failures.
pub fn write_report(report: &SnapReportDoc, path: &Path) -> PipelineResult<()> {
    let text = serde_json::to_string_pretty(report)?;
    fs::write(path, text)?;
    Ok(())
}

/// A typed descriptor for one retrievable output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Preview image for the artifact; empty when none is rendered.
    pub preview_image_url: String,
    /// Artifact kind, serialized as `"type"`.
    #[serde(rename = "type")]
    pub kind: ArtifactKind,
    /// Where the file can be retrieved.
    pub url: String,
}

/// What kind of file an [`Artifact`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// A JSON report.
    Json,
    /// A mesh file.
    Obj,
    /// A run log.
    Log,
}

impl Artifact {
    /// Descriptor for a file on the local filesystem.
    #[must_use]
    pub fn local(kind: ArtifactKind, path: &Path) -> Self {
        Self {
            preview_image_url: String::new(),
            kind,
            url: path.display().to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn artifact_kind_serializes_as_type() {
        let artifact = Artifact::local(ArtifactKind::Obj, Path::new("/out/seam_imprinted.obj"));
        let json = serde_json::to_value(&artifact).unwrap();
        assert_eq!(json["type"], "obj");
        assert_eq!(json["url"], "/out/seam_imprinted.obj");
        assert_eq!(json["preview_image_url"], "");
    }

    #[test]
    fn report_round_trips_through_json() {
        let doc = SnapReportDoc {
            schema_version: REPORT_SCHEMA_VERSION,
            input: InputSection {
                model: "m.obj".to_owned(),
                points_json: "p.json".to_owned(),
            },
            chosen: ChosenSection {
                axis: AxisRemap::YUpToZUp,
                points_origin: OriginPolicy::AsIs,
                bbox_center_world: [0.5, 0.5, 0.5],
                mean_dist_before_eval: Some(0.01),
                missed_eval: 0,
            },
            snap: SnapSection {
                max_snap_dist: 1000.0,
                dist_threshold: 0.001,
                missed: 1,
                stats_before: ResidualStats::default(),
                over_threshold: OverThresholdSection { count: 2 },
            },
            points: vec![PointRecord {
                x: 1.0,
                y: 2.0,
                z: 3.0,
            }],
        };

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["schema_version"], 1);
        assert_eq!(json["chosen"]["axis"], "y_up_to_z_up");
        assert_eq!(json["snap"]["over_threshold"]["count"], 2);

        let back: SnapReportDoc = serde_json::from_value(json).unwrap();
        assert_eq!(back.chosen.axis, AxisRemap::YUpToZUp);
        assert_eq!(back.points.len(), 1);
    }

    #[test]
    fn unscored_fallback_mean_is_null() {
        let chosen = ChosenSection {
            axis: AxisRemap::Identity,
            points_origin: OriginPolicy::AsIs,
            bbox_center_world: [0.0; 3],
            mean_dist_before_eval: None,
            missed_eval: 0,
        };
        let json = serde_json::to_value(&chosen).unwrap();
        assert!(json["mean_dist_before_eval"].is_null());
    }
}
