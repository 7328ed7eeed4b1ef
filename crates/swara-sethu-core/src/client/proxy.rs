//! Client for the same-origin proxy. Never handles the credential.

use crate::{
    AnalysisResult, Analyzer, CoreError, CoreResult, EncodedPayload,
    client::{
        gemini::parse_analysis_text,
        wire::{ANALYZE_PATH, ErrorBody, HEALTH_PATH, HealthReport, ProxyErrorCode, ProxyRequest},
    },
};

use std::{borrow::Cow, panic::Location};

use error_location::ErrorLocation;
use reqwest::StatusCode;
use tracing::{debug, info, instrument, warn};

const USER_AGENT: &str = concat!("swara-sethu-client/", env!("CARGO_PKG_VERSION"));

/// Talks to `POST /api/analyze` and `GET /health` on the proxy.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    /// Client for the proxy at `base_url` (scheme, host and port).
    #[track_caller]
    pub fn new(base_url: impl Into<String>) -> CoreResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CoreError::Transport {
                reason: format!("Failed to build HTTP client: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        debug!(base_url = %base_url, "ProxyClient initialized");

        Ok(Self { http, base_url })
    }

    /// Proxy address.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the proxy whether it can authorize analyses.
    ///
    /// An unreachable or unhealthy proxy is a [`CoreError::Transport`]
    /// failure. Only a proxy that answers without a key configured yields
    /// [`CoreError::MissingCredential`].
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn preflight(&self) -> CoreResult<HealthReport> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, HEALTH_PATH))
            .send()
            .await
            .map_err(|e| CoreError::Transport {
                reason: format!("Analysis proxy is unreachable: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::Transport {
                reason: format!("Analysis proxy health check failed (HTTP {}).", status.as_u16()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let report: HealthReport =
            response.json().await.map_err(|e| CoreError::MalformedResponse {
                reason: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if !report.credential_configured {
            warn!("Proxy reports no API key configured");
            return Err(CoreError::MissingCredential {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        info!(version = %report.version, "Proxy ready");

        Ok(report)
    }

    /// Forward the payload and parse the proxy's answer.
    #[instrument(skip(self, payload), fields(base_url = %self.base_url, encoded_len = payload.encoded_len()))]
    pub async fn submit(&self, payload: &EncodedPayload) -> CoreResult<AnalysisResult> {
        let request = ProxyRequest {
            audio_base64: Cow::Borrowed(payload.as_str()),
            mime_type: Some(Cow::Borrowed(payload.media_type())),
        };

        let response = self
            .http
            .post(format!("{}{}", self.base_url, ANALYZE_PATH))
            .json(&request)
            .send()
            .await
            .map_err(|e| CoreError::Transport {
                reason: format!("Could not reach analysis proxy: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| CoreError::Transport {
            reason: format!("Failed to read proxy response: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if !status.is_success() {
            return Err(error_from_body(status, &body));
        }

        parse_analysis_text(&body)
    }
}

impl Analyzer for ProxyClient {
    async fn ensure_authorized(&self) -> CoreResult<()> {
        self.preflight().await.map(|_| ())
    }

    async fn analyze(&self, payload: &EncodedPayload) -> CoreResult<AnalysisResult> {
        self.submit(payload).await
    }
}

// Error bodies that do not parse still yield an error for the status.
#[track_caller]
fn error_from_body(status: StatusCode, body: &str) -> CoreError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed
            .error
            .code
            .into_error(status.as_u16(), parsed.error.message),
        Err(_) if status == StatusCode::UNAUTHORIZED => CoreError::Unauthorized {
            reason: "Analysis proxy rejected the request.".to_string(),
            location: ErrorLocation::from(Location::caller()),
        },
        Err(_) => ProxyErrorCode::Unknown.into_error(status.as_u16(), body.trim().to_string()),
    }
}
