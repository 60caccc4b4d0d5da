//! End-to-end seam run orchestration.
//!
//! Takes a [`SeamRequest`] naming a model file and a point payload,
//! drives calibration, surface snapping, topology imprinting, and
//! preview extraction in order, and writes the artifacts (report,
//! imprinted mesh, preview mesh, run log) under an output directory.
//! Progress is reported through a [`ProgressSink`] at fixed
//! checkpoints; a wall-clock budget, when set, is enforced between
//! stages.
//!
//! # Example
//!
//! ```
//! use seam_host::{save_obj, IndexedHost};
//! use seam_pipeline::{run, SeamRequest, TracingSink};
//! use seam_types::unit_cube;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let model = dir.path().join("cube.obj");
//! save_obj(&unit_cube(), &model).unwrap();
//! let points = dir.path().join("points.json");
//! std::fs::write(
//!     &points,
//!     r#"[{"x":0.0,"y":0.0,"z":0.0},{"x":1.0,"y":0.0,"z":0.0}]"#,
//! )
//! .unwrap();
//!
//! let request = SeamRequest::new(&model, &points);
//! let mut host = IndexedHost::new();
//! let summary = run(&mut host, &request, &dir.path().join("out"), &mut TracingSink).unwrap();
//!
//! // Both points sit on cube corners: two reuses, one seam edge.
//! assert_eq!(summary.imprint.unwrap().seam_edge_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod points;
mod progress;
mod report;
mod request;
mod run;

pub use error::{PipelineError, PipelineResult};
pub use points::{load_points, PointRecord};
pub use progress::{Checkpoint, ProgressSink, TracingSink};
pub use report::{
    build_report, write_report, Artifact, ArtifactKind, ChosenSection, InputSection,
    OverThresholdSection, SnapReportDoc, SnapSection, REPORT_SCHEMA_VERSION,
};
pub use request::SeamRequest;
pub use run::{run, RunSummary};
