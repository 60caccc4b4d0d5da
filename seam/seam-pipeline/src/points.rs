//! Point payload loading.
//!
//! The external payload is JSON, either a bare list of `{x, y, z}`
//! records or an object wrapping such a list under `"points"`. Order
//! is preserved; a payload with fewer than two points is a hard input
//! error because nothing can be connected from it.

use std::fs;
use std::path::Path;

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PipelineError, PipelineResult};

/// One point of the external payload, in wire form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl From<Point3<f64>> for PointRecord {
    fn from(p: Point3<f64>) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

impl From<PointRecord> for Point3<f64> {
    fn from(r: PointRecord) -> Self {
        Point3::new(r.x, r.y, r.z)
    }
}

/// The two accepted payload shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PointPayload {
    Bare(Vec<PointRecord>),
    Wrapped { points: Vec<PointRecord> },
}

/// Load an ordered point sequence from a JSON payload file.
///
/// # Errors
///
/// [`PipelineError::PointsFileNotFound`] when the path does not exist,
/// [`PipelineError::Json`] for a malformed payload, and
/// [`PipelineError::TooFewPoints`] when fewer than two points are
/// present.
pub fn load_points(path: &Path) -> PipelineResult<Vec<Point3<f64>>> {
    if !path.is_file() {
        return Err(PipelineError::PointsFileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path)?;
    let payload: PointPayload = serde_json::from_str(&text)?;
    let records = match payload {
        PointPayload::Bare(records) | PointPayload::Wrapped { points: records } => records,
    };
    if records.len() < 2 {
        return Err(PipelineError::TooFewPoints {
            count: records.len(),
        });
    }
    info!(path = %path.display(), points = records.len(), "loaded point payload");
    Ok(records.into_iter().map(Point3::from).collect())
}
