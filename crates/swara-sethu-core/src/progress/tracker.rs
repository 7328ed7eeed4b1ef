use crate::{CoreError, CoreResult, ProcessingStage};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::sync::watch;
use tracing::debug;

/// Strictly linear stage machine for one submission.
///
/// Observers receive every change through a `watch` channel. The tracker
/// also records the stages visited since the last reset.
#[derive(Debug)]
pub struct StageTracker {
    current: ProcessingStage,
    visited: Vec<ProcessingStage>,
    stage_tx: watch::Sender<ProcessingStage>,
}

impl StageTracker {
    /// Create a tracker in `Idle`.
    pub fn new() -> Self {
        let (stage_tx, _) = watch::channel(ProcessingStage::Idle);
        Self {
            current: ProcessingStage::Idle,
            visited: vec![ProcessingStage::Idle],
            stage_tx,
        }
    }

    /// Current stage.
    pub fn stage(&self) -> ProcessingStage {
        self.current
    }

    /// Stages visited since creation or the last reset, in order.
    pub fn visited(&self) -> &[ProcessingStage] {
        &self.visited
    }

    /// Receive stage changes.
    pub fn subscribe(&self) -> watch::Receiver<ProcessingStage> {
        self.stage_tx.subscribe()
    }

    /// Move to `next`, which must be the immediate successor of the
    /// current stage.
    #[track_caller]
    pub fn advance(&mut self, next: ProcessingStage) -> CoreResult<()> {
        if self.current.successor() != Some(next) {
            return Err(CoreError::InvalidTransition {
                from: self.current,
                to: next,
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.set(next);
        Ok(())
    }

    /// Move to `Error`. Allowed from any non-terminal stage.
    #[track_caller]
    pub fn fail(&mut self) -> CoreResult<()> {
        if self.current.is_terminal() {
            return Err(CoreError::InvalidTransition {
                from: self.current,
                to: ProcessingStage::Error,
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.set(ProcessingStage::Error);
        Ok(())
    }

    /// Return to `Idle` from any stage and forget the visit history.
    pub fn reset(&mut self) {
        self.visited.clear();
        self.set(ProcessingStage::Idle);
    }

    fn set(&mut self, stage: ProcessingStage) {
        debug!(from = %self.current, to = %stage, "Stage changed");
        self.current = stage;
        self.visited.push(stage);
        self.stage_tx.send_replace(stage);
    }
}

impl Default for StageTracker {
    fn default() -> Self {
        Self::new()
    }
}
