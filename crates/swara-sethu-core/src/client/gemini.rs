//! Classification endpoint client.
//!
//! Runs inside the proxy only: the credential is injected at construction
//! and never leaves this process.

use crate::{
    ANALYSIS_PROMPT, AnalysisResult, Analyzer, CoreError, CoreResult, EncodedPayload,
    response_schema,
};

use std::{fmt, panic::Location};

use error_location::ErrorLocation;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Public Generative Language API host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Low temperature keeps the verdict close to deterministic.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

const USER_AGENT: &str = concat!("swara-sethu/", env!("CARGO_PKG_VERSION"));
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Secret for the classification endpoint. `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key. Blank input yields `None`.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Where and how to call the classification endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct GeminiSettings {
    /// Model name, e.g. `gemini-2.5-flash`.
    pub model: String,
    /// Scheme and host, without a trailing path.
    pub base_url: String,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Sends one `generateContent` request per analysis.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    settings: GeminiSettings,
    api_key: Option<ApiKey>,
}

impl GeminiClient {
    /// Build a client. A missing key is not an error here; every
    /// [`classify`](Self::classify) call reports it instead.
    #[track_caller]
    pub fn new(settings: GeminiSettings, api_key: Option<ApiKey>) -> CoreResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CoreError::Transport {
                reason: format!("Failed to build HTTP client: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if api_key.is_none() {
            warn!("No API key configured, analysis requests will be rejected");
        }

        info!(model = %settings.model, base_url = %settings.base_url, "GeminiClient initialized");

        Ok(Self {
            http,
            settings,
            api_key,
        })
    }

    /// Whether a credential was supplied.
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Active settings.
    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }

    /// Full `generateContent` URL for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    /// Send the prompt plus inline audio and parse the structured answer.
    ///
    /// # Errors
    ///
    /// - [`CoreError::MissingCredential`] when no key is configured
    /// - [`CoreError::Unauthorized`] on HTTP 401/403
    /// - [`CoreError::Transport`] on network failure or other non-success
    /// - [`CoreError::EmptyResponse`] / [`CoreError::MalformedResponse`]
    ///   when the answer is not an analysis result
    #[instrument(skip(self, payload), fields(model = %self.settings.model, encoded_len = payload.encoded_len()))]
    pub async fn classify(&self, payload: &EncodedPayload) -> CoreResult<AnalysisResult> {
        let api_key = self.require_key()?;
        let request = self.build_request(payload);

        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| CoreError::Transport {
                reason: format!("Failed to reach analysis service: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(CoreError::Unauthorized {
                reason: format!("Analysis service rejected the API key (HTTP {}).", status.as_u16()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CoreError::Transport {
                reason: format!(
                    "analysis service returned HTTP {}: {}",
                    status.as_u16(),
                    body.trim()
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let body: GenerateContentResponse =
            response.json().await.map_err(|e| CoreError::MalformedResponse {
                reason: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let text = body.text();
        debug!(text_len = text.len(), "Analysis service answered");

        let result = parse_analysis_text(&text)?;

        info!(
            classification = %result.classification,
            confidence = result.confidence,
            language = %result.language,
            "Analysis complete"
        );

        Ok(result)
    }

    #[track_caller]
    fn require_key(&self) -> CoreResult<&ApiKey> {
        self.api_key.as_ref().ok_or(CoreError::MissingCredential {
            location: ErrorLocation::from(Location::caller()),
        })
    }

    fn build_request<'a>(&self, payload: &'a EncodedPayload) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: ANALYSIS_PROMPT,
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: payload.media_type(),
                            data: payload.as_str(),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
                temperature: self.settings.temperature,
            },
        }
    }
}

impl Analyzer for GeminiClient {
    async fn ensure_authorized(&self) -> CoreResult<()> {
        self.require_key().map(|_| ())
    }

    async fn analyze(&self, payload: &EncodedPayload) -> CoreResult<AnalysisResult> {
        self.classify(payload).await
    }
}

/// Parse the endpoint's text answer into a result.
#[track_caller]
pub(crate) fn parse_analysis_text(text: &str) -> CoreResult<AnalysisResult> {
    let text = text.trim();

    if text.is_empty() {
        return Err(CoreError::EmptyResponse {
            location: ErrorLocation::from(Location::caller()),
        });
    }

    serde_json::from_str(text).map_err(|e| CoreError::MalformedResponse {
        reason: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
    temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}
