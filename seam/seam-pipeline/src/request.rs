//! The run request: inputs, tuning, and budget.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use seam_calibrate::{AxisSpec, OriginSpec};

fn default_max_snap_dist() -> f64 {
    1000.0
}

fn default_dist_threshold() -> f64 {
    0.001
}

fn default_vertex_snap_eps() -> f64 {
    1e-6
}

fn default_imprint() -> bool {
    true
}

/// Everything one seam run needs, deserializable from a JSON request.
///
/// Only the two file paths are required; every tuning knob carries the
/// same default the original tooling shipped with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeamRequest {
    /// Path to the model file.
    pub model: PathBuf,
    /// Path to the point payload JSON.
    pub points: PathBuf,
    /// Axis mode: pinned remap or automatic search.
    #[serde(default)]
    pub axis: AxisSpec,
    /// Origin mode: pinned policy or automatic search.
    #[serde(default)]
    pub origin: OriginSpec,
    /// Search radius for calibration scoring and surface snapping.
    #[serde(default = "default_max_snap_dist")]
    pub max_snap_dist: f64,
    /// Residuals above this distance are flagged in the report.
    #[serde(default = "default_dist_threshold")]
    pub dist_threshold: f64,
    /// Points within this distance of an existing vertex reuse it.
    #[serde(default = "default_vertex_snap_eps")]
    pub vertex_snap_eps: f64,
    /// Whether to imprint the seam into the mesh after snapping.
    #[serde(default = "default_imprint")]
    pub imprint: bool,
    /// Wall-clock budget in seconds; `None` means unbounded.
    #[serde(default)]
    pub budget_secs: Option<u64>,
}

impl SeamRequest {
    /// A request with default tuning for the given input files.
    #[must_use]
    pub fn new(model: impl Into<PathBuf>, points: impl Into<PathBuf>) -> Self {
        Self {
            model: model.into(),
            points: points.into(),
            axis: AxisSpec::Auto,
            origin: OriginSpec::Auto,
            max_snap_dist: default_max_snap_dist(),
            dist_threshold: default_dist_threshold(),
            vertex_snap_eps: default_vertex_snap_eps(),
            imprint: default_imprint(),
            budget_secs: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn minimal_request_gets_defaults() {
        let request: SeamRequest =
            serde_json::from_str(r#"{"model":"m.obj","points":"p.json"}"#).unwrap();
        assert_eq!(request, SeamRequest::new("m.obj", "p.json"));
        assert_relative_eq!(request.max_snap_dist, 1000.0);
        assert_relative_eq!(request.dist_threshold, 0.001);
        assert_relative_eq!(request.vertex_snap_eps, 1e-6);
        assert!(request.imprint);
        assert!(request.budget_secs.is_none());
    }

    #[test]
    fn pinned_modes_deserialize_from_snake_case() {
        let request: SeamRequest = serde_json::from_str(
            r#"{"model":"m.obj","points":"p.json","axis":"y_up_to_z_up","origin":"model_bbox_center","imprint":false}"#,
        )
        .unwrap();
        assert_eq!(request.axis, AxisSpec::YUpToZUp);
        assert_eq!(request.origin, OriginSpec::ModelBboxCenter);
        assert!(!request.imprint);
    }
}
