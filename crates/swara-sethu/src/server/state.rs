use swara_sethu_core::GeminiClient;

use std::time::Instant;

/// Shared state of the proxy. Holds the only copy of the credential.
pub(crate) struct AppState {
    pub gemini: GeminiClient,
    pub started_at: Instant,
}

impl AppState {
    pub(crate) fn new(gemini: GeminiClient) -> Self {
        Self {
            gemini,
            started_at: Instant::now(),
        }
    }

    pub(crate) fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
