//! JSON shapes exchanged between the client and the same-origin proxy.

use crate::CoreError;

use std::{borrow::Cow, panic::Location};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Route accepting analysis submissions.
pub const ANALYZE_PATH: &str = "/api/analyze";

/// Route reporting proxy health and credential presence.
pub const HEALTH_PATH: &str = "/health";

/// Body of `POST /api/analyze`.
///
/// `audio_base64` may be raw base64 or a data URL.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest<'a> {
    /// Encoded audio.
    pub audio_base64: Cow<'a, str>,
    /// Transport media type of the audio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<Cow<'a, str>>,
}

/// Machine-readable error code in proxy error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProxyErrorCode {
    /// The proxy holds no credential.
    MissingCredential,
    /// The classification endpoint rejected the credential.
    Unauthorized,
    /// The submitted payload was rejected.
    BadRequest,
    /// Network failure or non-success status from the classification endpoint.
    UpstreamError,
    /// The classification endpoint returned no text.
    EmptyUpstreamResponse,
    /// The classification endpoint returned text that is not a result.
    InvalidUpstreamResponse,
    /// Failure inside the proxy itself.
    InternalError,
    /// A code this client does not know.
    #[serde(other)]
    Unknown,
}

impl ProxyErrorCode {
    /// Code the proxy reports for `error`.
    pub fn for_error(error: &CoreError) -> Self {
        match error {
            CoreError::MissingCredential { .. } => ProxyErrorCode::MissingCredential,
            CoreError::Unauthorized { .. } => ProxyErrorCode::Unauthorized,
            CoreError::NoFileSelected { .. }
            | CoreError::MultipleFiles { .. }
            | CoreError::InvalidFormat { .. }
            | CoreError::FileTooLarge { .. }
            | CoreError::InvalidPayload { .. } => ProxyErrorCode::BadRequest,
            CoreError::Transport { .. } => ProxyErrorCode::UpstreamError,
            CoreError::EmptyResponse { .. } => ProxyErrorCode::EmptyUpstreamResponse,
            CoreError::MalformedResponse { .. } => ProxyErrorCode::InvalidUpstreamResponse,
            CoreError::Io { .. }
            | CoreError::SessionBusy { .. }
            | CoreError::InvalidTransition { .. } => ProxyErrorCode::InternalError,
        }
    }

    /// Rebuild a client-side error from a proxy error body.
    #[track_caller]
    pub fn into_error(self, status: u16, message: String) -> CoreError {
        let location = ErrorLocation::from(Location::caller());
        match self {
            ProxyErrorCode::MissingCredential => CoreError::MissingCredential { location },
            ProxyErrorCode::Unauthorized => CoreError::Unauthorized {
                reason: message,
                location,
            },
            ProxyErrorCode::EmptyUpstreamResponse => CoreError::EmptyResponse { location },
            ProxyErrorCode::InvalidUpstreamResponse => CoreError::MalformedResponse {
                reason: message,
                location,
            },
            ProxyErrorCode::BadRequest
            | ProxyErrorCode::UpstreamError
            | ProxyErrorCode::InternalError
            | ProxyErrorCode::Unknown => CoreError::Transport {
                reason: format!("proxy returned HTTP {}: {}", status, message),
                location,
            },
        }
    }
}

/// `{ "error": { "code": ..., "message": ... } }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error details.
    pub error: ErrorDetail,
}

/// Inner part of [`ErrorBody`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable code.
    pub code: ProxyErrorCode,
    /// Human-readable message.
    pub message: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Always `"ok"` while the proxy answers.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Proxy version.
    pub version: String,
    /// Seconds since the proxy started.
    pub uptime_seconds: u64,
    /// Whether a credential for the classification endpoint is configured.
    pub credential_configured: bool,
}
