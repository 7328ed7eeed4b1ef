mod stage;
mod steps;
mod ticker;
mod tracker;

pub use {
    stage::ProcessingStage,
    steps::{PIPELINE_STEPS, PipelineStep, StepStatus, step_status},
    ticker::{COSMETIC_STAGES, DEFAULT_STAGE_DURATION, DecorativeProgressTicker},
    tracker::StageTracker,
};
