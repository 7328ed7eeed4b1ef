use crate::server::{ApiError, AppState};

use swara_sethu_core::{
    AnalysisResult, CoreError, EncodedPayload, check_size,
    wire::{HealthReport, ProxyRequest},
};

use std::{panic::Location, sync::Arc};

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use error_location::ErrorLocation;
use tracing::{info, instrument};
use uuid::Uuid;

const SERVICE_NAME: &str = "swara-sethu";

/// `GET /health`
pub(crate) async fn health(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        credential_configured: state.gemini.has_credential(),
    })
}

/// `POST /api/analyze`
///
/// Checks the credential, then the payload size, then its encoding, then
/// forwards exactly one request to the classification endpoint.
#[instrument(skip(state, request), fields(request_id = %Uuid::new_v4()))]
pub(crate) async fn analyze(
    State(state): State<Arc<AppState>>,
    request: Result<Json<ProxyRequest<'static>>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    if !state.gemini.has_credential() {
        return Err(CoreError::MissingCredential {
            location: ErrorLocation::from(Location::caller()),
        }
        .into());
    }

    let Json(request) = request.map_err(|e| ApiError::MalformedBody {
        reason: e.body_text(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let mut payload = EncodedPayload::from_data_url(&request.audio_base64);
    if let Some(media_type) = request.mime_type {
        payload = payload.with_media_type(media_type.into_owned());
    }

    check_size(payload.decoded_len() as u64)?;
    payload.decode()?;

    info!(
        size = payload.decoded_len(),
        media_type = %payload.media_type(),
        "Forwarding audio for analysis"
    );

    let result = state.gemini.classify(&payload).await?;

    Ok(Json(result))
}
