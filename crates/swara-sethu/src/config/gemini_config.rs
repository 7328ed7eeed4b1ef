use crate::config::{default_base_url, default_model, default_temperature};

use std::fmt;

use serde::{Deserialize, Serialize};
use swara_sethu_core::{ApiKey, GeminiSettings};

/// Classification endpoint configuration, used by the proxy only.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model name.
    #[serde(default = "default_model")]
    pub model: String,

    /// Scheme and host of the endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// API key. Usually supplied through the environment instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            api_key: None,
        }
    }
}

// Keeps the key out of logs.
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl GeminiConfig {
    /// Endpoint settings for [`swara_sethu_core::GeminiClient`].
    pub fn settings(&self) -> GeminiSettings {
        GeminiSettings {
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            temperature: self.temperature,
        }
    }

    /// The key from `override_key`, falling back to the file. Blank keys count as absent.
    pub fn api_key(&self, override_key: Option<String>) -> Option<ApiKey> {
        override_key
            .and_then(ApiKey::new)
            .or_else(|| self.api_key.clone().and_then(ApiKey::new))
    }
}
