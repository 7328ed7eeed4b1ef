use crate::ProcessingStage;

/// One row of the progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStep {
    /// Stage during which this row is active.
    pub stage: ProcessingStage,
    /// Headline.
    pub label: &'static str,
    /// Secondary line.
    pub detail: &'static str,
}

/// The rows shown while a submission is in flight.
pub const PIPELINE_STEPS: [PipelineStep; 4] = [
    PipelineStep {
        stage: ProcessingStage::AnalyzingCnn,
        label: "CNN Acoustic Analysis",
        detail: "Checking spectral artifacts",
    },
    PipelineStep {
        stage: ProcessingStage::AnalyzingLstm,
        label: "LSTM Temporal Analysis",
        detail: "Evaluating emotional uniformity",
    },
    PipelineStep {
        stage: ProcessingStage::AnalyzingXgb,
        label: "XGBoost Physiological Analysis",
        detail: "Detecting breathing patterns",
    },
    PipelineStep {
        stage: ProcessingStage::Deciding,
        label: "Aggregating Scores",
        detail: "Finalizing confidence metric",
    },
];

impl PipelineStep {
    /// The row whose stage is `stage`, if any.
    pub fn for_stage(stage: ProcessingStage) -> Option<&'static PipelineStep> {
        let steps: &'static [PipelineStep] = &PIPELINE_STEPS;
        steps.iter().find(|step| step.stage == stage)
    }
}

/// How a row is drawn relative to the current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Not reached yet.
    Pending,
    /// Current stage.
    Active,
    /// Already passed.
    Completed,
}

/// Status of the row for `step` while the session is in `current`.
///
/// Every row is completed once the session completes; on `Error` every row
/// falls back to pending.
pub fn step_status(current: ProcessingStage, step: ProcessingStage) -> StepStatus {
    if current == ProcessingStage::Completed {
        return StepStatus::Completed;
    }

    match (current.order_index(), step.order_index()) {
        (Some(current_index), Some(step_index)) if current_index == step_index => {
            StepStatus::Active
        }
        (Some(current_index), Some(step_index)) if current_index > step_index => {
            StepStatus::Completed
        }
        _ => StepStatus::Pending,
    }
}
