//! Terminal rendering of stages and results.

use swara_sethu_core::{AnalysisResult, COSMETIC_STAGES, PipelineStep, ProcessingStage};

const METER_WIDTH: usize = 20;

/// Progress line for a stage change, if the stage has one.
pub(crate) fn stage_line(stage: ProcessingStage) -> Option<String> {
    match stage {
        ProcessingStage::Uploading => Some("Uploading voice sample...".to_string()),
        _ => PipelineStep::for_stage(stage).map(|step| {
            // Aggregation is the fourth step after the three cosmetic ones.
            let position = COSMETIC_STAGES
                .iter()
                .position(|s| *s == stage)
                .unwrap_or(COSMETIC_STAGES.len())
                + 1;
            format!("[{}/4] {}: {}", position, step.label, step.detail)
        }),
    }
}

/// Confidence meter such as `[##########----------]`.
pub(crate) fn meter(percent: u8) -> String {
    let filled = (usize::from(percent.min(100)) * METER_WIDTH + 50) / 100;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(METER_WIDTH - filled)
    )
}

/// Multi-line report card for a completed analysis.
pub(crate) fn render_report(result: &AnalysisResult) -> String {
    let verdict = if result.is_human() {
        "HUMAN VOICE"
    } else {
        "SYNTHETIC VOICE SUSPECTED"
    };

    let mut out = String::new();
    out.push_str(&format!(
        "Classification:    {} ({})\n",
        result.classification, verdict
    ));
    out.push_str(&format!(
        "Confidence Score:  {} {} {}%\n",
        result.confidence_display(),
        meter(result.confidence_percent()),
        result.confidence_percent()
    ));
    out.push_str(&format!("Detected Language: {}\n", result.language));
    out.push_str(&format!("Explanation:       {}\n", result.explanation));
    out.push_str("Components:        CNN Acoustic | LSTM Temporal | XGB Physiological\n");
    out
}

/// Banner for a terminal error.
pub(crate) fn render_banner(message: &str) -> String {
    format!("Analysis rejected: {}\nRun the command again to retry.", message)
}
