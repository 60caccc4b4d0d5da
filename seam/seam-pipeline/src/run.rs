//! The run sequencer.
//!
//! Stages run strictly in order: import, load, index, calibrate, snap,
//! report, imprint, preview, save. There is no cross-stage pipelining;
//! within-run state is single-threaded and the only interleaving is
//! the checkpoint reporting between stages. The wall-clock budget is
//! checked at stage boundaries and exceeding it is fatal, never
//! retried.

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use tracing::info;

use seam_calibrate::{calibrate, AxisRemap, OriginPolicy};
use seam_host::MeshHost;
use seam_imprint::{imprint_seam, ImprintOutcome, ImprintParams};
use seam_index::SurfaceIndex;
use seam_preview::extract_preview;
use seam_snap::{snap_points, SnapParams};

use crate::error::{PipelineError, PipelineResult};
use crate::points::load_points;
use crate::progress::{Checkpoint, ProgressSink};
use crate::report::{build_report, write_report, Artifact, ArtifactKind};
use crate::request::SeamRequest;

/// What one completed run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// The winning axis remap.
    pub axis: AxisRemap,
    /// The winning origin policy.
    pub origin: OriginPolicy,
    /// Number of input points.
    pub points: usize,
    /// Points the snap pass missed.
    pub snap_missed: usize,
    /// Points whose snap residual exceeded the threshold.
    pub over_threshold: usize,
    /// Imprint counters; `None` when imprinting was not requested.
    pub imprint: Option<ImprintOutcome>,
    /// Descriptors for every file the run wrote.
    pub artifacts: Vec<Artifact>,
    /// Wall-clock time the run took.
    pub elapsed: Duration,
}

#[allow(clippy::cast_precision_loss)]
fn check_budget(start: Instant, budget_secs: Option<u64>) -> PipelineResult<()> {
    if let Some(budget) = budget_secs {
        if start.elapsed().as_secs_f64() >= budget as f64 {
            return Err(PipelineError::Timeout {
                budget_secs: budget,
            });
        }
    }
    Ok(())
}

/// Run the whole pipeline: calibrate, snap, imprint, and write
/// artifacts under `out_dir`.
///
/// A run that produced at least one seam edge is a success even when
/// individual points missed or segments failed to connect; those
/// surface as counters in the returned [`RunSummary`]. Any fatal error
/// reports [`ProgressSink::failed`] exactly once before propagating.
///
/// # Errors
///
/// See [`PipelineError`]; everything it names is fatal.
pub fn run(
    host: &mut dyn MeshHost,
    request: &SeamRequest,
    out_dir: &Path,
    sink: &mut dyn ProgressSink,
) -> PipelineResult<RunSummary> {
    match run_stages(host, request, out_dir, sink) {
        Ok(summary) => {
            sink.checkpoint(Checkpoint::Complete);
            Ok(summary)
        }
        Err(err) => {
            sink.failed(&err.to_string());
            Err(err)
        }
    }
}

fn run_stages(
    host: &mut dyn MeshHost,
    request: &SeamRequest,
    out_dir: &Path,
    sink: &mut dyn ProgressSink,
) -> PipelineResult<RunSummary> {
    let start = Instant::now();
    check_budget(start, request.budget_secs)?;
    sink.checkpoint(Checkpoint::Started);
    fs::create_dir_all(out_dir)?;

    let mut mesh = host.import(&request.model)?;
    let points = load_points(&request.points)?;
    let index = SurfaceIndex::build(&mesh)?;
    let bbox_center = mesh.bounds().center();

    let calibration = calibrate(
        &index,
        &bbox_center,
        &points,
        request.axis,
        request.origin,
        request.max_snap_dist,
    );
    let snap = snap_points(
        &index,
        &calibration.points,
        &SnapParams {
            max_snap_dist: request.max_snap_dist,
            dist_threshold: request.dist_threshold,
        },
    );
    sink.checkpoint(Checkpoint::Calibrated);
    check_budget(start, request.budget_secs)?;

    let report = build_report(request, &calibration, &snap);
    let report_path = out_dir.join("snapped_points.json");
    write_report(&report, &report_path)?;
    let mut artifacts = vec![Artifact::local(ArtifactKind::Json, &report_path)];

    let mut imprint = None;
    if request.imprint {
        let outcome = imprint_seam(
            host,
            &mut mesh,
            &snap.snapped_points(),
            &ImprintParams {
                vertex_snap_eps: request.vertex_snap_eps,
                max_snap_dist: request.max_snap_dist,
            },
        )?;
        info!(
            points = points.len(),
            inserted = outcome.inserted,
            reused = outcome.reused,
            missed = outcome.missed,
            connect_failed = outcome.connect_failed,
            seam_edges = outcome.seam_edge_count(),
            "imprint finished"
        );

        let mesh_path = out_dir.join("seam_imprinted.obj");
        host.save(&mesh, &mesh_path)?;
        artifacts.push(Artifact::local(ArtifactKind::Obj, &mesh_path));

        if outcome.seam_edge_count() > 0 {
            let preview = extract_preview(&mesh)?;
            let preview_path = out_dir.join("seam_preview.obj");
            host.save(&preview, &preview_path)?;
            artifacts.push(Artifact::local(ArtifactKind::Obj, &preview_path));
        }
        imprint = Some(outcome);
    }
    sink.checkpoint(Checkpoint::Imprinted);
    check_budget(start, request.budget_secs)?;

    let log_path = out_dir.join("run.log");
    fs::write(&log_path, render_run_log(request, points.len(), imprint.as_ref()))?;
    artifacts.push(Artifact::local(ArtifactKind::Log, &log_path));

    Ok(RunSummary {
        axis: calibration.axis,
        origin: calibration.origin,
        points: points.len(),
        snap_missed: snap.missed,
        over_threshold: snap.over_threshold,
        imprint,
        artifacts,
        elapsed: start.elapsed(),
    })
}

fn render_run_log(
    request: &SeamRequest,
    point_count: usize,
    imprint: Option<&ImprintOutcome>,
) -> String {
    let mut log = format!(
        "model={}\npoints_json={}\npoints={point_count}\n",
        request.model.display(),
        request.points.display(),
    );
    match imprint {
        Some(outcome) => {
            log.push_str(&format!(
                "inserted={} reused={} missed={} connect_failed={} seam_edges={}\n",
                outcome.inserted,
                outcome.reused,
                outcome.missed,
                outcome.connect_failed,
                outcome.seam_edge_count(),
            ));
        }
        None => log.push_str("imprint=skipped\n"),
    }
    log
}
