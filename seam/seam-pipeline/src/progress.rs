//! Progress checkpoints and the sink they report through.

use tracing::{error, info};

/// The fixed checkpoints a run passes through, with the percentage
/// each one reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    /// Inputs accepted, work begins.
    Started,
    /// Frame chosen and points snapped.
    Calibrated,
    /// Seam imprinted into the mesh.
    Imprinted,
    /// All artifacts written.
    Complete,
}

impl Checkpoint {
    /// The percentage this checkpoint reports.
    #[must_use]
    pub const fn percent(self) -> f64 {
        match self {
            Self::Started => 10.0,
            Self::Calibrated => 40.0,
            Self::Imprinted => 80.0,
            Self::Complete => 100.0,
        }
    }
}

/// Where a run reports its progress and terminal failure.
///
/// Runs call [`checkpoint`](Self::checkpoint) at each stage boundary
/// and [`failed`](Self::failed) exactly once before a fatal error
/// propagates.
pub trait ProgressSink {
    /// A checkpoint was reached.
    fn checkpoint(&mut self, checkpoint: Checkpoint);

    /// The run failed; `message` is the fatal error's rendering.
    fn failed(&mut self, message: &str);
}

/// Default sink: structured log events, nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn checkpoint(&mut self, checkpoint: Checkpoint) {
        info!(?checkpoint, percent = checkpoint.percent(), "progress");
    }

    fn failed(&mut self, message: &str) {
        error!(message, "run failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn percentages_are_monotonic() {
        let order = [
            Checkpoint::Started,
            Checkpoint::Calibrated,
            Checkpoint::Imprinted,
            Checkpoint::Complete,
        ];
        for pair in order.windows(2) {
            assert!(pair[0].percent() < pair[1].percent());
        }
        assert_relative_eq!(Checkpoint::Started.percent(), 10.0);
        assert_relative_eq!(Checkpoint::Complete.percent(), 100.0);
    }
}
