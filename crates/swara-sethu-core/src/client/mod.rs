mod gemini;
mod proxy;
pub mod wire;

pub use {
    gemini::{
        ApiKey, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE, GeminiClient, GeminiSettings,
    },
    proxy::ProxyClient,
};
