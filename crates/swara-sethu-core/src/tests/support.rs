#![allow(clippy::unwrap_used)]

use crate::{
    AnalysisResult, Analyzer, Classification, CoreError, CoreResult, EncodedPayload,
    UploadedFile,
};

use std::{
    panic::Location,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::Router;
use error_location::ErrorLocation;
use tokio::{net::TcpListener, time::Instant};

/// Minimal ID3-tagged MP3 header followed by zero padding.
pub(crate) fn mp3_bytes(len: usize) -> Vec<u8> {
    let mut bytes = b"ID3\x04\x00\x00\x00\x00\x00\x00".to_vec();
    bytes.resize(len.max(bytes.len()), 0);
    bytes
}

pub(crate) fn mp3_file(name: &str) -> UploadedFile {
    UploadedFile::from_bytes(name, Some("audio/mpeg".to_string()), mp3_bytes(64))
}

pub(crate) fn human_result() -> AnalysisResult {
    AnalysisResult {
        classification: Classification::Human,
        confidence: 0.87,
        language: "Tamil".to_string(),
        explanation: "CNN: natural noise floor. LSTM: varied cadence. XGBoost: breathing present."
            .to_string(),
    }
}

/// Canned outcome for [`FakeAnalyzer`].
#[derive(Clone)]
pub(crate) enum FakeOutcome {
    Success(AnalysisResult),
    Transport,
    Empty,
}

/// In-process stand-in for the remote endpoint.
#[derive(Clone)]
pub(crate) struct FakeAnalyzer {
    outcome: FakeOutcome,
    delay: Duration,
    authorized: bool,
    calls: Arc<AtomicUsize>,
    called_at: Arc<Mutex<Option<Instant>>>,
}

impl FakeAnalyzer {
    pub(crate) fn new(outcome: FakeOutcome) -> Self {
        Self {
            outcome,
            delay: Duration::ZERO,
            authorized: true,
            calls: Arc::new(AtomicUsize::new(0)),
            called_at: Arc::new(Mutex::new(None)),
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn unauthorized(mut self) -> Self {
        self.authorized = false;
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn called_at(&self) -> Option<Instant> {
        *self.called_at.lock().unwrap()
    }
}

impl Analyzer for FakeAnalyzer {
    async fn ensure_authorized(&self) -> CoreResult<()> {
        if self.authorized {
            Ok(())
        } else {
            Err(CoreError::MissingCredential {
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }

    async fn analyze(&self, _payload: &EncodedPayload) -> CoreResult<AnalysisResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.called_at.lock().unwrap() = Some(Instant::now());

        tokio::time::sleep(self.delay).await;

        match &self.outcome {
            FakeOutcome::Success(result) => Ok(result.clone()),
            FakeOutcome::Transport => Err(CoreError::Transport {
                reason: "connection reset by peer".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
            FakeOutcome::Empty => Err(CoreError::EmptyResponse {
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
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

/// A local address nothing listens on.
pub(crate) async fn dead_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
