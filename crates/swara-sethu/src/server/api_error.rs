use swara_sethu_core::{
    CoreError,
    wire::{ErrorBody, ErrorDetail, ProxyErrorCode},
};

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use thiserror::Error;
use tracing::{error, warn};

/// Errors returned by proxy handlers as `{ "error": { "code", "message" } }`.
#[derive(Error, Debug)]
pub(crate) enum ApiError {
    /// Failure from validation or the classification endpoint.
    #[error("Analysis error: {source} {location}")]
    Core {
        /// The underlying core error.
        #[source]
        source: CoreError,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Request body is not a valid analysis request.
    #[error("Malformed request body: {reason} {location}")]
    MalformedBody {
        /// Parser error description.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },
}

impl ApiError {
    /// Machine-readable code for the response body.
    pub(crate) fn code(&self) -> ProxyErrorCode {
        match self {
            ApiError::Core { source, .. } => ProxyErrorCode::for_error(source),
            ApiError::MalformedBody { .. } => ProxyErrorCode::BadRequest,
        }
    }

    // Clients rebuild their own banner from code and message, so send the
    // bare reason rather than a finished sentence.
    fn message(&self) -> String {
        match self {
            ApiError::Core { source, .. } => match source {
                CoreError::Unauthorized { reason, .. }
                | CoreError::InvalidPayload { reason, .. }
                | CoreError::Transport { reason, .. }
                | CoreError::MalformedResponse { reason, .. } => reason.clone(),
                other => other.user_message(),
            },
            ApiError::MalformedBody { reason, .. } => reason.clone(),
        }
    }
}

/// HTTP status for a proxy error code.
fn status_for(code: ProxyErrorCode) -> StatusCode {
    match code {
        ProxyErrorCode::MissingCredential | ProxyErrorCode::Unauthorized => {
            StatusCode::UNAUTHORIZED
        }
        ProxyErrorCode::BadRequest => StatusCode::BAD_REQUEST,
        ProxyErrorCode::UpstreamError
        | ProxyErrorCode::EmptyUpstreamResponse
        | ProxyErrorCode::InvalidUpstreamResponse => StatusCode::BAD_GATEWAY,
        ProxyErrorCode::InternalError | ProxyErrorCode::Unknown => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status = status_for(code);

        if status.is_server_error() {
            error!(code = ?code, error = ?self, "Analysis request failed");
        } else {
            warn!(code = ?code, error = ?self, "Analysis request rejected");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code,
                message: self.message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        ApiError::Core {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
