use std::fmt;

use serde::{Deserialize, Serialize};

/// Verdict returned by the classification endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    /// Synthetic voice.
    AiGenerated,
    /// Natural voice.
    Human,
    /// Anything the endpoint returns outside the two known verdicts.
    #[serde(other)]
    Unknown,
}

impl Classification {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::AiGenerated => "AI_GENERATED",
            Classification::Human => "HUMAN",
            Classification::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one analysis.
///
/// `confidence` is passed through as received; it is only meaningful
/// together with `classification` and is not range-checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Final verdict.
    pub classification: Classification,
    /// Combined confidence, nominally in `0..=1`.
    pub confidence: f64,
    /// Detected spoken language.
    pub language: String,
    /// Short justification covering the three analysis components.
    pub explanation: String,
}

impl AnalysisResult {
    /// True for a `HUMAN` verdict.
    pub fn is_human(&self) -> bool {
        self.classification == Classification::Human
    }

    /// Confidence rounded to two decimals, as shown on the report.
    pub fn confidence_display(&self) -> String {
        format!("{:.2}", self.confidence)
    }

    /// Fill level of the confidence meter, 0 to 100.
    pub fn confidence_percent(&self) -> u8 {
        let percent = (self.confidence * 100.0).round();
        if percent.is_nan() {
            return 0;
        }
        percent.clamp(0.0, 100.0) as u8
    }
}
