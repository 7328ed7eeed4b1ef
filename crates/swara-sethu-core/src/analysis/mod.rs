mod analyzer;
mod prompt;
mod result;

pub use {
    analyzer::Analyzer,
    prompt::{ANALYSIS_PROMPT, response_schema},
    result::{AnalysisResult, Classification},
};
