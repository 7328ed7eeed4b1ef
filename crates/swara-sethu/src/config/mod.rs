mod client_config;
#[allow(clippy::module_inception)]
mod config;
mod gemini_config;
mod progress_config;
mod server_config;

pub(crate) use {
    client_config::ClientConfig, config::Config, gemini_config::GeminiConfig,
    progress_config::ProgressConfig, server_config::ServerConfig,
};

use swara_sethu_core::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE};

pub(crate) const DEFAULT_PORT: u16 = 7878;
pub(crate) const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
pub(crate) const DEFAULT_STAGE_DURATION_MS: u64 = 1200;

pub(crate) fn default_port() -> u16 {
    DEFAULT_PORT
}

pub(crate) fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

pub(crate) fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

pub(crate) fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

pub(crate) fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

pub(crate) fn default_stage_durations_ms() -> [u64; 3] {
    [DEFAULT_STAGE_DURATION_MS; 3]
}
