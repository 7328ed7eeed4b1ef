use crate::{CoreResult, ProcessingStage, progress::StageTracker};

use std::time::Duration;

use tracing::{debug, instrument};

/// Default time spent in each cosmetic stage.
pub const DEFAULT_STAGE_DURATION: Duration = Duration::from_millis(1200);

/// The decorative stages, in display order.
pub const COSMETIC_STAGES: [ProcessingStage; 3] = [
    ProcessingStage::AnalyzingCnn,
    ProcessingStage::AnalyzingLstm,
    ProcessingStage::AnalyzingXgb,
];

/// Walks the cosmetic stages on fixed timers, then hands over to `Deciding`.
///
/// Nothing is computed while a stage is shown. The timings are independent
/// of the remote call, which only starts once `Deciding` is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecorativeProgressTicker {
    durations: [Duration; 3],
}

impl DecorativeProgressTicker {
    /// Same duration for every cosmetic stage.
    pub fn new(stage_duration: Duration) -> Self {
        Self {
            durations: [stage_duration; 3],
        }
    }

    /// Per-stage durations, in [`COSMETIC_STAGES`] order.
    pub fn with_durations(durations: [Duration; 3]) -> Self {
        Self { durations }
    }

    /// Configured per-stage durations.
    pub fn durations(&self) -> [Duration; 3] {
        self.durations
    }

    /// Total time spent before `Deciding`.
    pub fn total(&self) -> Duration {
        self.durations.iter().sum()
    }

    /// Advance from `Uploading` through every cosmetic stage to `Deciding`.
    #[instrument(skip_all)]
    pub async fn run(&self, tracker: &mut StageTracker) -> CoreResult<()> {
        for (stage, duration) in COSMETIC_STAGES.into_iter().zip(self.durations) {
            tracker.advance(stage)?;
            debug!(stage = %stage, duration_ms = duration.as_millis(), "Cosmetic stage");
            tokio::time::sleep(duration).await;
        }

        tracker.advance(ProcessingStage::Deciding)
    }
}

impl Default for DecorativeProgressTicker {
    fn default() -> Self {
        Self::new(DEFAULT_STAGE_DURATION)
    }
}
