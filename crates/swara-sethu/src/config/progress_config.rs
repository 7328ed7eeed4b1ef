use crate::config::default_stage_durations_ms;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use swara_sethu_core::DecorativeProgressTicker;

/// Pacing of the cosmetic analysis stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// Milliseconds spent in the CNN, LSTM and XGBoost stages.
    #[serde(default = "default_stage_durations_ms")]
    pub stage_durations_ms: [u64; 3],
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            stage_durations_ms: default_stage_durations_ms(),
        }
    }
}

impl ProgressConfig {
    /// Ticker with the configured durations.
    pub fn ticker(&self) -> DecorativeProgressTicker {
        DecorativeProgressTicker::with_durations(self.stage_durations_ms.map(Duration::from_millis))
    }
}
