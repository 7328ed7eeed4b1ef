#![allow(clippy::unwrap_used)]

use swara_sethu_core::{AnalysisResult, Classification};

use axum::{Router, http::StatusCode};
use serde_json::json;
use tokio::net::TcpListener;

/// Minimal ID3-tagged MP3 header followed by zero padding.
pub(crate) fn mp3_bytes(len: usize) -> Vec<u8> {
    let mut bytes = b"ID3\x04\x00\x00\x00\x00\x00\x00".to_vec();
    bytes.resize(len.max(bytes.len()), 0);
    bytes
}

pub(crate) fn ai_result() -> AnalysisResult {
    AnalysisResult {
        classification: Classification::AiGenerated,
        confidence: 0.91,
        language: "Telugu".to_string(),
        explanation: "CNN: vocoder phase artifacts. LSTM: flat cadence. XGBoost: no breaths."
            .to_string(),
    }
}

/// Stand-in classification endpoint answering every request the same way.
pub(crate) fn fake_gemini(status: StatusCode, result: Option<&AnalysisResult>) -> Router {
    let body = match result {
        Some(result) => {
            let text = serde_json::to_string(result).unwrap();
            json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] }).to_string()
        }
        None => json!({ "candidates": [] }).to_string(),
    };

    Router::new().fallback(move || {
        let body = body.clone();
        async move { (status, body) }
    })
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub(crate) async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    format!("http://{}", addr)
}

/// Base URL of a port that was bound and released, so nothing listens there.
pub(crate) async fn dead_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", address)
}
