use crate::ProcessingStage;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Submission, transport and state errors with source location tracking.
#[derive(Error, Debug)]
pub enum CoreError {
    /// No file was supplied to the upload control.
    #[error("No file selected {location}")]
    NoFileSelected {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// More than one file was supplied at once.
    #[error("Multi-file upload rejected: {count} files supplied {location}")]
    MultipleFiles {
        /// Number of files supplied.
        count: usize,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Neither the media type nor the file name indicate MP3.
    #[error("Invalid format for {file_name:?} {location}")]
    InvalidFormat {
        /// Name of the rejected file.
        file_name: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// File exceeds the upload size limit.
    #[error("File too large: {size} bytes exceeds {limit} bytes {location}")]
    FileTooLarge {
        /// Size of the rejected file in bytes.
        size: u64,
        /// Maximum accepted size in bytes.
        limit: u64,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The audio payload is empty or not valid base64.
    #[error("Invalid audio payload: {reason} {location}")]
    InvalidPayload {
        /// Why the payload was rejected.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// No credential is configured for the classification endpoint.
    #[error("API key is missing {location}")]
    MissingCredential {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The credential was rejected, or the proxy cannot vouch for one.
    #[error("Unauthorized: {reason} {location}")]
    Unauthorized {
        /// Description of the rejection.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Network failure or non-success HTTP status.
    #[error("Transport error: {reason} {location}")]
    Transport {
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The classification endpoint answered with no text.
    #[error("Empty response from analysis service {location}")]
    EmptyResponse {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The response body does not match the analysis result schema.
    #[error("Malformed analysis response: {reason} {location}")]
    MalformedResponse {
        /// Parser error description.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Reading the uploaded file failed.
    #[error("IO error: {source} {location}")]
    Io {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A submission was attempted while the session is not idle.
    #[error("Session is not idle (stage {stage}) {location}")]
    SessionBusy {
        /// Stage the session was in.
        stage: ProcessingStage,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A stage change that breaks the linear stage order.
    #[error("Invalid stage transition from {from} to {to} {location}")]
    InvalidTransition {
        /// Stage before the attempted transition.
        from: ProcessingStage,
        /// Requested stage.
        to: ProcessingStage,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Error taxonomy used to decide how a failure is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad file count, type or size. Reported inline, stage unchanged.
    Validation,
    /// Missing or rejected credential. Blocks submission.
    Credential,
    /// Network failure or non-success response.
    Transport,
    /// Empty or unparseable response body.
    Schema,
    /// Local read failure.
    Io,
    /// Session or stage machine misuse.
    State,
}

impl CoreError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::NoFileSelected { .. }
            | CoreError::MultipleFiles { .. }
            | CoreError::InvalidFormat { .. }
            | CoreError::FileTooLarge { .. }
            | CoreError::InvalidPayload { .. } => ErrorKind::Validation,
            CoreError::MissingCredential { .. } | CoreError::Unauthorized { .. } => {
                ErrorKind::Credential
            }
            CoreError::Transport { .. } => ErrorKind::Transport,
            CoreError::EmptyResponse { .. } | CoreError::MalformedResponse { .. } => {
                ErrorKind::Schema
            }
            CoreError::Io { .. } => ErrorKind::Io,
            CoreError::SessionBusy { .. } | CoreError::InvalidTransition { .. } => {
                ErrorKind::State
            }
        }
    }

    /// Message suitable for display next to the upload control or in the
    /// rejection banner. Never empty, never carries source locations.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::NoFileSelected { .. } => {
                "No file selected. Choose one MP3 file to analyze.".to_string()
            }
            CoreError::MultipleFiles { .. } => {
                "Multi-file upload rejected. Only one audio file allowed per request.".to_string()
            }
            CoreError::InvalidFormat { .. } => {
                "Invalid format. Only MP3 files are accepted.".to_string()
            }
            CoreError::FileTooLarge { .. } => {
                "File size too large. Please upload an MP3 under 10MB.".to_string()
            }
            CoreError::InvalidPayload { reason, .. } => {
                format!("Invalid audio payload: {}", reason)
            }
            CoreError::MissingCredential { .. } => {
                "System Security Alert: Unauthorized. No API Key provided.".to_string()
            }
            CoreError::Unauthorized { reason, .. } => {
                format!("System Security Alert: Unauthorized. {}", reason)
            }
            CoreError::Transport { reason, .. } => format!("Analysis failed: {}", reason),
            CoreError::EmptyResponse { .. } => "Empty response from analysis service.".to_string(),
            CoreError::MalformedResponse { reason, .. } => {
                format!("Failed to parse analysis response: {}", reason)
            }
            CoreError::Io { source, .. } => format!("Failed to read audio file: {}", source),
            CoreError::SessionBusy { .. } => {
                "An analysis is already running or awaiting reset.".to_string()
            }
            CoreError::InvalidTransition { from, to, .. } => {
                format!("Unexpected stage change from {} to {}.", from, to)
            }
        }
    }
}

// Manual From with location tracking; #[from] cannot fill extra fields.
impl From<std::io::Error> for CoreError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        CoreError::Io {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
