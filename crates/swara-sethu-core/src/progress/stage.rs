use std::fmt;

use serde::{Deserialize, Serialize};

/// Display stages of a single submission.
///
/// The three `Analyzing*` stages are cosmetic: they are advanced by
/// [`DecorativeProgressTicker`](crate::DecorativeProgressTicker) on fixed
/// timers and do not correspond to any computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingStage {
    /// Waiting for a file.
    Idle,
    /// Reading and encoding the selected file.
    Uploading,
    /// Cosmetic acoustic stage.
    AnalyzingCnn,
    /// Cosmetic temporal/emotional stage.
    AnalyzingLstm,
    /// Cosmetic physiological stage.
    AnalyzingXgb,
    /// Waiting on the classification endpoint.
    Deciding,
    /// Result available. Terminal.
    Completed,
    /// Submission failed. Terminal.
    Error,
}

impl ProcessingStage {
    /// Every non-error stage in the order a successful submission visits them.
    pub const LINEAR_ORDER: [ProcessingStage; 7] = [
        ProcessingStage::Idle,
        ProcessingStage::Uploading,
        ProcessingStage::AnalyzingCnn,
        ProcessingStage::AnalyzingLstm,
        ProcessingStage::AnalyzingXgb,
        ProcessingStage::Deciding,
        ProcessingStage::Completed,
    ];

    /// Position in [`Self::LINEAR_ORDER`]; `None` for `Error`.
    pub fn order_index(self) -> Option<usize> {
        Self::LINEAR_ORDER.iter().position(|stage| *stage == self)
    }

    /// The only stage `advance` may move to from here.
    pub fn successor(self) -> Option<ProcessingStage> {
        match self {
            ProcessingStage::Idle => Some(ProcessingStage::Uploading),
            ProcessingStage::Uploading => Some(ProcessingStage::AnalyzingCnn),
            ProcessingStage::AnalyzingCnn => Some(ProcessingStage::AnalyzingLstm),
            ProcessingStage::AnalyzingLstm => Some(ProcessingStage::AnalyzingXgb),
            ProcessingStage::AnalyzingXgb => Some(ProcessingStage::Deciding),
            ProcessingStage::Deciding => Some(ProcessingStage::Completed),
            ProcessingStage::Completed | ProcessingStage::Error => None,
        }
    }

    /// `Completed` and `Error` only leave through a reset.
    pub fn is_terminal(self) -> bool {
        matches!(self, ProcessingStage::Completed | ProcessingStage::Error)
    }

    /// True while a submission is in flight (upload control disabled).
    pub fn is_in_flight(self) -> bool {
        !matches!(self, ProcessingStage::Idle) && !self.is_terminal()
    }

    /// Wire name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ProcessingStage::Idle => "IDLE",
            ProcessingStage::Uploading => "UPLOADING",
            ProcessingStage::AnalyzingCnn => "ANALYZING_CNN",
            ProcessingStage::AnalyzingLstm => "ANALYZING_LSTM",
            ProcessingStage::AnalyzingXgb => "ANALYZING_XGB",
            ProcessingStage::Deciding => "DECIDING",
            ProcessingStage::Completed => "COMPLETED",
            ProcessingStage::Error => "ERROR",
        }
    }
}

impl fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
