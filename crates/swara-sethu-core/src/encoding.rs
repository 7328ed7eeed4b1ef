//! Base64 transport encoding for uploaded audio.

use crate::{CoreError, CoreResult, UploadedFile};

use std::{fmt, panic::Location};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use error_location::ErrorLocation;
use tracing::{debug, instrument};

/// Media type sent alongside inline audio to the classification endpoint.
pub const TRANSPORT_MEDIA_TYPE: &str = "audio/mp3";

/// Base64 audio ready for transport. Used once, never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    data: String,
    media_type: String,
}

// Payloads run to megabytes; print the size instead of the contents.
impl fmt::Debug for EncodedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedPayload")
            .field("encoded_len", &self.data.len())
            .field("media_type", &self.media_type)
            .finish()
    }
}

impl EncodedPayload {
    /// Read and encode a validated file.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Io`] if the file cannot be read.
    #[instrument(skip(file), fields(file_name = %file.name(), size = file.size()))]
    pub async fn from_file(file: &UploadedFile) -> CoreResult<Self> {
        let bytes = file.read_bytes().await?;
        let payload = Self::from_bytes(&bytes);

        debug!(encoded_len = payload.data.len(), "Audio encoded");

        Ok(payload)
    }

    /// Encode raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            data: STANDARD.encode(bytes),
            media_type: TRANSPORT_MEDIA_TYPE.to_string(),
        }
    }

    /// Accept either raw base64 or a `data:<mime>;base64,<data>` URL.
    ///
    /// The header is dropped; surrounding whitespace is trimmed. The data is
    /// not checked here, see [`EncodedPayload::decode`].
    pub fn from_data_url(input: &str) -> Self {
        let trimmed = input.trim();
        let data = match trimmed.strip_prefix("data:") {
            Some(rest) => rest.split_once(',').map(|(_, data)| data).unwrap_or(""),
            None => trimmed,
        };

        Self {
            data: data.to_string(),
            media_type: TRANSPORT_MEDIA_TYPE.to_string(),
        }
    }

    /// Replace the transport media type.
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = media_type.into();
        self
    }

    /// The base64 text.
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Transport media type.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Length of the base64 text.
    pub fn encoded_len(&self) -> usize {
        self.data.len()
    }

    /// True when there is no audio at all.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of bytes the text decodes to, assuming valid padded base64.
    pub fn decoded_len(&self) -> usize {
        let padding = self.data.bytes().rev().take_while(|b| *b == b'=').count();
        (self.data.len() / 4 * 3).saturating_sub(padding.min(2))
    }

    /// Decode back to bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPayload`] for empty or malformed base64.
    #[track_caller]
    pub fn decode(&self) -> CoreResult<Vec<u8>> {
        if self.data.is_empty() {
            return Err(CoreError::InvalidPayload {
                reason: "no audio provided".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| CoreError::InvalidPayload {
                reason: format!("audio is not valid base64: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Give up the base64 text.
    pub fn into_string(self) -> String {
        self.data
    }
}
