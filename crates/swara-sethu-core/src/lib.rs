//! Swara Sethu Core Library
//!
//! AI voice detection front-end logic: MP3 intake and validation, base64
//! encoding, a decorative progress display, and a single request to a
//! generative classification endpoint through a credential-holding proxy.
//!
//! # Example
//!
//! ```no_run
//! use swara_sethu_core::{
//!     AnalysisSession, CoreResult, DecorativeProgressTicker, ProxyClient, UploadedFile,
//! };
//!
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> CoreResult<()> {
//!     let client = ProxyClient::new("http://127.0.0.1:7878")?;
//!     let mut session = AnalysisSession::new(client, DecorativeProgressTicker::default());
//!
//!     session.preflight().await?;
//!
//!     let file = UploadedFile::from_path(Path::new("voice.mp3")).await?;
//!     let result = session.submit(vec![file]).await?;
//!
//!     println!("{} ({})", result.classification, result.confidence_display());
//!     Ok(())
//! }
//! ```

mod analysis;
mod client;
mod encoding;
mod error;
mod intake;
mod progress;
mod session;

pub use {
    analysis::{ANALYSIS_PROMPT, AnalysisResult, Analyzer, Classification, response_schema},
    client::{
        ApiKey, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE, GeminiClient,
        GeminiSettings, ProxyClient, wire,
    },
    encoding::{EncodedPayload, TRANSPORT_MEDIA_TYPE},
    error::{CoreError, ErrorKind, Result as CoreResult},
    intake::{
        FileSource, MAX_UPLOAD_BYTES, MP3_MEDIA_TYPE, UploadedFile, check_count, check_size,
        is_mp3, select_single, validate,
    },
    progress::{
        COSMETIC_STAGES, DEFAULT_STAGE_DURATION, DecorativeProgressTicker, PIPELINE_STEPS,
        PipelineStep, ProcessingStage, StageTracker, StepStatus, step_status,
    },
    session::AnalysisSession,
};

#[cfg(test)]
mod tests;
