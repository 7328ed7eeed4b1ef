//! One client-side submission lifecycle.
//!
//! Validation → encoding → cosmetic stages → one remote call → result or
//! error, then an explicit reset back to `Idle`.

use crate::{
    AnalysisResult, Analyzer, CoreError, CoreResult, DecorativeProgressTicker, EncodedPayload,
    ProcessingStage, StageTracker, UploadedFile, intake,
};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::sync::watch;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// Drives submissions through the stage machine and holds what the
/// display shows: current stage, result, banner error and intake error.
///
/// A new submission is only accepted from `Idle`. After `Completed` or
/// `Error` the caller must [`reset`](Self::reset) first.
pub struct AnalysisSession<A> {
    analyzer: A,
    ticker: DecorativeProgressTicker,
    tracker: StageTracker,
    result: Option<AnalysisResult>,
    error: Option<String>,
    intake_error: Option<String>,
}

impl<A: Analyzer> AnalysisSession<A> {
    /// Create an idle session.
    pub fn new(analyzer: A, ticker: DecorativeProgressTicker) -> Self {
        Self {
            analyzer,
            ticker,
            tracker: StageTracker::new(),
            result: None,
            error: None,
            intake_error: None,
        }
    }

    /// Current stage.
    pub fn stage(&self) -> ProcessingStage {
        self.tracker.stage()
    }

    /// Stages visited since the last reset.
    pub fn visited(&self) -> &[ProcessingStage] {
        self.tracker.visited()
    }

    /// Receive stage changes.
    pub fn subscribe(&self) -> watch::Receiver<ProcessingStage> {
        self.tracker.subscribe()
    }

    /// Result of the last successful submission.
    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Banner message of the last terminal error.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Message of the last rejected selection.
    pub fn intake_error(&self) -> Option<&str> {
        self.intake_error.as_deref()
    }

    /// Whether the upload control is enabled.
    pub fn accepts_uploads(&self) -> bool {
        self.stage() == ProcessingStage::Idle && self.error.is_none()
    }

    /// The request-issuing component.
    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Confirm a credential is available. On failure the session moves to
    /// `Error` with a banner, blocking submissions until reset.
    #[instrument(skip(self))]
    pub async fn preflight(&mut self) -> CoreResult<()> {
        match self.analyzer.ensure_authorized().await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(error = ?e, "Credential check failed");
                self.enter_error(&e);
                Err(e)
            }
        }
    }

    /// Check the size of a gesture before its files are read.
    ///
    /// A count other than one is recorded as the intake error, exactly as
    /// [`submit`](Self::submit) would, and leaves the stage untouched.
    #[instrument(skip(self))]
    pub fn check_selection(&mut self, count: usize) -> CoreResult<()> {
        self.intake_error = None;
        intake::check_count(count).inspect_err(|e| {
            warn!(error = ?e, "Selection rejected");
            self.intake_error = Some(e.user_message());
        })
    }

    /// Submit the files from one drop or pick gesture.
    ///
    /// Selection errors leave the stage untouched and are recorded as the
    /// intake error. Any later failure moves the session to `Error`.
    #[instrument(skip(self, files), fields(file_count = files.len()))]
    pub async fn submit(&mut self, files: Vec<UploadedFile>) -> CoreResult<AnalysisResult> {
        let stage = self.stage();
        if stage != ProcessingStage::Idle || self.error.is_some() {
            return Err(CoreError::SessionBusy {
                stage,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.intake_error = None;

        let file = match intake::select_single(files) {
            Ok(file) => file,
            Err(e) => {
                warn!(error = ?e, "Selection rejected");
                self.intake_error = Some(e.user_message());
                return Err(e);
            }
        };

        let session_id = Uuid::new_v4();
        self.result = None;
        self.error = None;

        info!(
            session_id = %session_id,
            file_name = %file.name(),
            size = file.size(),
            "Submission accepted"
        );

        match self.run(&file).await {
            Ok(result) => {
                self.tracker.advance(ProcessingStage::Completed)?;
                info!(
                    session_id = %session_id,
                    classification = %result.classification,
                    confidence = result.confidence,
                    "Submission completed"
                );
                self.result = Some(result.clone());
                Ok(result)
            }
            Err(e) => {
                error!(session_id = %session_id, error = ?e, "Submission failed");
                self.enter_error(&e);
                Err(e)
            }
        }
    }

    /// Back to `Idle` from any stage, clearing result and errors.
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.result = None;
        self.error = None;
        self.intake_error = None;
        info!("Session reset");
    }

    async fn run(&mut self, file: &UploadedFile) -> CoreResult<AnalysisResult> {
        self.tracker.advance(ProcessingStage::Uploading)?;
        let payload = EncodedPayload::from_file(file).await?;

        self.ticker.run(&mut self.tracker).await?;

        self.analyzer.analyze(&payload).await
    }

    fn enter_error(&mut self, error: &CoreError) {
        if let Err(e) = self.tracker.fail() {
            warn!(error = ?e, "Stage machine already terminal");
        }
        self.result = None;
        self.error = Some(error.user_message());
    }
}
