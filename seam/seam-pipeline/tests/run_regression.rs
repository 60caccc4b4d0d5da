//! End-to-end runs over a cube model on disk.

#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::PathBuf;

use seam_calibrate::AxisSpec;
use seam_host::{load_obj, save_obj, IndexedHost};
use seam_pipeline::{
    run, Checkpoint, PipelineError, ProgressSink, SeamRequest, SnapReportDoc,
};
use seam_types::unit_cube;
use tempfile::{tempdir, TempDir};

#[derive(Default)]
struct RecordingSink {
    checkpoints: Vec<Checkpoint>,
    failures: Vec<String>,
}

impl ProgressSink for RecordingSink {
    fn checkpoint(&mut self, checkpoint: Checkpoint) {
        self.checkpoints.push(checkpoint);
    }

    fn failed(&mut self, message: &str) {
        self.failures.push(message.to_owned());
    }
}

/// Cube model plus a point payload, on disk.
fn stage_inputs(points_json: &str) -> (TempDir, SeamRequest, PathBuf) {
    let dir = tempdir().unwrap();
    let model = dir.path().join("cube.obj");
    save_obj(&unit_cube(), &model).unwrap();
    let points = dir.path().join("points.json");
    fs::write(&points, points_json).unwrap();
    let out_dir = dir.path().join("out");
    let request = SeamRequest::new(&model, &points);
    (dir, request, out_dir)
}

#[test]
fn full_run_writes_all_artifacts() {
    let (_dir, request, out_dir) =
        stage_inputs(r#"[{"x":0.0,"y":0.0,"z":0.0},{"x":1.0,"y":0.0,"z":0.0}]"#);
    let mut sink = RecordingSink::default();

    let summary = run(&mut IndexedHost::new(), &request, &out_dir, &mut sink).unwrap();

    assert_eq!(
        sink.checkpoints,
        vec![
            Checkpoint::Started,
            Checkpoint::Calibrated,
            Checkpoint::Imprinted,
            Checkpoint::Complete,
        ]
    );
    assert!(sink.failures.is_empty());

    // Both points are cube corners on a shared edge.
    let outcome = summary.imprint.unwrap();
    assert_eq!(outcome.reused, 2);
    assert_eq!(outcome.inserted, 0);
    assert_eq!(outcome.seam_edge_count(), 1);

    // Report parses back with the stable schema.
    let report: SnapReportDoc =
        serde_json::from_str(&fs::read_to_string(out_dir.join("snapped_points.json")).unwrap())
            .unwrap();
    assert_eq!(report.schema_version, 1);
    assert_eq!(report.snap.missed, 0);
    assert_eq!(report.points.len(), 2);

    // The imprinted mesh reloads with its seam flags intact.
    let imprinted = load_obj(&out_dir.join("seam_imprinted.obj")).unwrap();
    assert_eq!(imprinted.seam_edge_count(), 1);

    // The preview is line-only: seam vertices and edges, no faces.
    let preview = load_obj(&out_dir.join("seam_preview.obj")).unwrap();
    assert_eq!(preview.vertex_count(), 2);
    assert_eq!(preview.face_count(), 0);
    assert_eq!(preview.seam_edge_count(), 1);

    assert!(out_dir.join("run.log").is_file());
    assert_eq!(summary.artifacts.len(), 4);
}

#[test]
fn snap_miss_breaks_the_chain_but_not_the_run() {
    let (_dir, mut request, out_dir) = stage_inputs(
        r#"[{"x":0.0,"y":0.0,"z":0.0},{"x":1.0,"y":0.0,"z":0.0},{"x":50.0,"y":50.0,"z":50.0}]"#,
    );
    request.max_snap_dist = 0.5;
    let mut sink = RecordingSink::default();

    let summary = run(&mut IndexedHost::new(), &request, &out_dir, &mut sink).unwrap();

    assert_eq!(summary.snap_missed, 1);
    let outcome = summary.imprint.unwrap();
    assert_eq!(outcome.missed, 1);
    // The two on-surface points still connect in their own run.
    assert_eq!(outcome.seam_edge_count(), 1);
    assert!(sink.failures.is_empty());
}

#[test]
fn pinned_axis_recovers_a_remapped_frame() {
    // Corners authored in the Y-up frame; (x,-z,y) brings them onto
    // the cube at (0,0,0) and (1,1,1).
    let (_dir, mut request, out_dir) =
        stage_inputs(r#"[{"x":0.0,"y":0.0,"z":0.0},{"x":1.0,"y":1.0,"z":-1.0}]"#);
    request.axis = AxisSpec::YUpToZUp;
    let mut sink = RecordingSink::default();

    let summary = run(&mut IndexedHost::new(), &request, &out_dir, &mut sink).unwrap();

    let report: SnapReportDoc =
        serde_json::from_str(&fs::read_to_string(out_dir.join("snapped_points.json")).unwrap())
            .unwrap();
    assert_eq!(
        serde_json::to_value(report.chosen.axis).unwrap(),
        "y_up_to_z_up"
    );
    // Opposite cube corners connect through three unit edges.
    assert_eq!(summary.imprint.unwrap().seam_edge_count(), 3);
}

#[test]
fn imprint_can_be_skipped() {
    let (_dir, mut request, out_dir) =
        stage_inputs(r#"[{"x":0.0,"y":0.0,"z":0.0},{"x":1.0,"y":0.0,"z":0.0}]"#);
    request.imprint = false;
    let mut sink = RecordingSink::default();

    let summary = run(&mut IndexedHost::new(), &request, &out_dir, &mut sink).unwrap();

    assert!(summary.imprint.is_none());
    // Report and log only; no mesh artifacts.
    assert_eq!(summary.artifacts.len(), 2);
    assert!(!out_dir.join("seam_imprinted.obj").exists());
}

#[test]
fn zero_budget_times_out_before_any_work() {
    let (_dir, mut request, out_dir) =
        stage_inputs(r#"[{"x":0.0,"y":0.0,"z":0.0},{"x":1.0,"y":0.0,"z":0.0}]"#);
    request.budget_secs = Some(0);
    let mut sink = RecordingSink::default();

    let result = run(&mut IndexedHost::new(), &request, &out_dir, &mut sink);

    assert!(matches!(
        result,
        Err(PipelineError::Timeout { budget_secs: 0 })
    ));
    assert!(sink.checkpoints.is_empty());
    assert_eq!(sink.failures.len(), 1);
}

#[test]
fn too_few_points_fails_through_the_sink() {
    let (_dir, request, out_dir) = stage_inputs(r#"[{"x":0.0,"y":0.0,"z":0.0}]"#);
    let mut sink = RecordingSink::default();

    let result = run(&mut IndexedHost::new(), &request, &out_dir, &mut sink);

    assert!(matches!(
        result,
        Err(PipelineError::TooFewPoints { count: 1 })
    ));
    assert_eq!(sink.failures.len(), 1);
    assert!(sink.failures[0].contains("at least 2"));
}

#[test]
fn rerun_over_imprinted_mesh_reuses_its_vertices() {
    let points = r#"[{"x":0.3,"y":0.2,"z":1.0},{"x":0.7,"y":0.6,"z":1.0}]"#;
    let (_dir, request, out_dir) = stage_inputs(points);
    let mut sink = RecordingSink::default();
    let mut host = IndexedHost::new();

    let first = run(&mut host, &request, &out_dir, &mut sink).unwrap();
    let first_outcome = first.imprint.unwrap();
    assert_eq!(first_outcome.inserted, 2);

    // Second pass over the already-imprinted mesh.
    let mut rerun_request = request.clone();
    rerun_request.model = out_dir.join("seam_imprinted.obj");
    let rerun_out = out_dir.join("rerun");
    let second = run(&mut host, &rerun_request, &rerun_out, &mut sink).unwrap();
    let second_outcome = second.imprint.unwrap();

    assert_eq!(second_outcome.inserted, 0);
    assert_eq!(second_outcome.reused, 2);
}
