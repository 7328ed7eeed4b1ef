use crate::{
    ApiKey, Classification, CoreError, EncodedPayload, GeminiClient, GeminiSettings, ProxyClient,
    TRANSPORT_MEDIA_TYPE,
    tests::support::{dead_address, human_result, mp3_bytes, spawn_server},
    wire::{ErrorBody, ErrorDetail, HealthReport, ProxyErrorCode},
};

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    http::{HeaderMap, StatusCode, Uri},
};
use serde_json::{Value, json};

/// What the fake endpoint saw.
#[derive(Debug, Clone, Default)]
struct Captured {
    path: String,
    api_key: Option<String>,
    body: Value,
}

type Capture = Arc<Mutex<Option<Captured>>>;

/// Router answering every request with `status` and `body`, recording the request.
fn recording_upstream(status: StatusCode, body: String) -> (Router, Capture) {
    let captured: Capture = Arc::new(Mutex::new(None));
    let sink = captured.clone();

    let router = Router::new().fallback(move |headers: HeaderMap, uri: Uri, request: String| {
        let sink = sink.clone();
        let body = body.clone();
        async move {
            let seen = Captured {
                path: uri.path().to_string(),
                api_key: headers
                    .get("x-goog-api-key")
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string),
                body: serde_json::from_str(&request).unwrap_or(Value::Null),
            };
            if let Ok(mut slot) = sink.lock() {
                *slot = Some(seen);
            }
            (status, body)
        }
    });

    (router, captured)
}

fn fixed_upstream(status: StatusCode, body: impl Into<String>) -> Router {
    recording_upstream(status, body.into()).0
}

/// Wrap `text` the way the endpoint returns generated content.
fn candidate_body(parts: &[&str]) -> String {
    let parts: Vec<Value> = parts.iter().map(|text| json!({ "text": text })).collect();
    json!({ "candidates": [{ "content": { "parts": parts, "role": "model" } }] }).to_string()
}

fn result_json() -> String {
    serde_json::to_string(&human_result()).unwrap_or_default()
}

fn payload() -> EncodedPayload {
    EncodedPayload::from_bytes(&mp3_bytes(64))
}

#[allow(clippy::unwrap_used)]
fn gemini(base_url: &str, key: Option<&str>) -> GeminiClient {
    let settings = GeminiSettings {
        base_url: base_url.to_string(),
        ..GeminiSettings::default()
    };
    GeminiClient::new(settings, key.and_then(ApiKey::new)).unwrap()
}

/// WHAT: One request with prompt, inline audio, schema and key header
/// WHY: The endpoint only returns structured results for this exact shape
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_key_when_classifying_then_request_shape_and_result() {
    // Given: A fake endpoint returning a valid result
    let (router, captured) = recording_upstream(StatusCode::OK, candidate_body(&[&result_json()]));
    let base = spawn_server(router).await;
    let client = gemini(&base, Some("test-key"));
    let payload = payload();

    // When: Classifying
    let result = client.classify(&payload).await.unwrap();

    // Then: Parsed result and a well-formed request
    assert_eq!(result, human_result());

    let seen = captured.lock().unwrap().clone().unwrap();
    assert_eq!(seen.path, "/v1beta/models/gemini-2.5-flash:generateContent");
    assert_eq!(seen.api_key.as_deref(), Some("test-key"));

    let parts = &seen.body["contents"][0]["parts"];
    assert!(parts[0]["text"].as_str().unwrap().contains("XGBoost"));
    assert_eq!(parts[1]["inlineData"]["mimeType"], TRANSPORT_MEDIA_TYPE);
    assert_eq!(parts[1]["inlineData"]["data"], payload.as_str());

    let config = &seen.body["generationConfig"];
    assert_eq!(config["responseMimeType"], "application/json");
    assert_eq!(
        config["responseSchema"]["required"],
        json!(["classification", "confidence", "language", "explanation"])
    );
}

/// WHAT: Text split across parts is joined before parsing
/// WHY: The endpoint may stream one JSON object as several parts
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_result_split_across_parts_when_classifying_then_joined() {
    // Given: The result JSON cut in two
    let json = result_json();
    let (head, tail) = json.split_at(json.len() / 2);
    let base = spawn_server(fixed_upstream(StatusCode::OK, candidate_body(&[head, tail]))).await;

    // When/Then: Parsed as one document
    let result = gemini(&base, Some("k")).classify(&payload()).await.unwrap();
    assert_eq!(result.classification, Classification::Human);
}

/// WHAT: No key means no request at all
/// WHY: Unauthenticated calls must never leave the process
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_no_key_when_classifying_then_missing_credential_without_call() {
    // Given: A reachable endpoint and a client without key
    let (router, captured) = recording_upstream(StatusCode::OK, candidate_body(&[&result_json()]));
    let base = spawn_server(router).await;
    let client = gemini(&base, None);

    // When: Classifying
    let result = client.classify(&payload()).await;

    // Then: Refused locally
    assert!(matches!(result, Err(CoreError::MissingCredential { .. })));
    assert!(captured.lock().unwrap().is_none());
    assert!(!client.has_credential());
}

/// WHAT: A blank key counts as no key
/// WHY: Empty environment variables must not look configured
#[test]
fn given_blank_key_when_wrapping_then_none() {
    assert!(ApiKey::new("   ").is_none());
    assert!(ApiKey::new("").is_none());

    let key = ApiKey::new(" secret ");
    assert!(key.is_some());
    assert_eq!(format!("{:?}", key), "Some(ApiKey(<redacted>))");
}

/// WHAT: HTTP 403 maps to Unauthorized, other failures to Transport
/// WHY: A rejected key is a credential problem, not a network problem
#[tokio::test]
async fn given_error_statuses_when_classifying_then_mapped_by_status() {
    // Given: Endpoints answering 403 and 500
    let forbidden = spawn_server(fixed_upstream(StatusCode::FORBIDDEN, "{}")).await;
    let broken = spawn_server(fixed_upstream(
        StatusCode::INTERNAL_SERVER_ERROR,
        "backend exploded",
    ))
    .await;

    // When: Classifying against each
    let forbidden_result = gemini(&forbidden, Some("k")).classify(&payload()).await;
    let broken_result = gemini(&broken, Some("k")).classify(&payload()).await;

    // Then: Credential error and transport error with the status
    assert!(matches!(forbidden_result, Err(CoreError::Unauthorized { .. })));
    assert!(matches!(
        broken_result,
        Err(CoreError::Transport { ref reason, .. })
            if reason.contains("500") && reason.contains("backend exploded")
    ));
}

/// WHAT: A response without text is an empty-response error
/// WHY: Completed must never be reached without a result
#[tokio::test]
async fn given_no_candidates_when_classifying_then_empty_response() {
    let base = spawn_server(fixed_upstream(StatusCode::OK, r#"{"candidates":[]}"#)).await;

    let result = gemini(&base, Some("k")).classify(&payload()).await;

    assert!(matches!(result, Err(CoreError::EmptyResponse { .. })));
}

/// WHAT: Text that is not a result object is a malformed-response error
/// WHY: Schema violations surface as errors, not partial results
#[tokio::test]
async fn given_prose_answer_when_classifying_then_malformed_response() {
    // Given: Prose, and JSON missing required fields
    let prose = spawn_server(fixed_upstream(
        StatusCode::OK,
        candidate_body(&["I think this is a human voice."]),
    ))
    .await;
    let partial = spawn_server(fixed_upstream(
        StatusCode::OK,
        candidate_body(&[r#"{"classification":"HUMAN"}"#]),
    ))
    .await;

    // When/Then: Both are malformed
    assert!(matches!(
        gemini(&prose, Some("k")).classify(&payload()).await,
        Err(CoreError::MalformedResponse { .. })
    ));
    assert!(matches!(
        gemini(&partial, Some("k")).classify(&payload()).await,
        Err(CoreError::MalformedResponse { .. })
    ));
}

/// WHAT: An unreachable endpoint is a transport error
/// WHY: Network failures end the submission with a banner
#[tokio::test]
async fn given_unreachable_endpoint_when_classifying_then_transport_error() {
    let base = dead_address().await;

    let result = gemini(&base, Some("k")).classify(&payload()).await;

    assert!(matches!(result, Err(CoreError::Transport { .. })));
}

/// WHAT: The proxy client posts the payload and parses the result
/// WHY: The browser-side component never sees the key
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_proxy_success_when_submitting_then_result_and_request_shape() {
    // Given: A proxy returning a result
    let (router, captured) = recording_upstream(StatusCode::OK, result_json());
    let base = spawn_server(router).await;
    let client = ProxyClient::new(format!("{}/", base)).unwrap();
    let payload = payload();

    // When: Submitting
    let result = client.submit(&payload).await.unwrap();

    // Then: Result parsed, request carries audio and type but no key
    assert_eq!(result, human_result());
    assert_eq!(client.base_url(), base);

    let seen = captured.lock().unwrap().clone().unwrap();
    assert_eq!(seen.path, "/api/analyze");
    assert_eq!(seen.body["audioBase64"], payload.as_str());
    assert_eq!(seen.body["mimeType"], TRANSPORT_MEDIA_TYPE);
    assert!(seen.api_key.is_none());
}

fn error_body(code: ProxyErrorCode, message: &str) -> String {
    serde_json::to_string(&ErrorBody {
        error: ErrorDetail {
            code,
            message: message.to_string(),
        },
    })
    .unwrap_or_default()
}

/// WHAT: Proxy error codes map back to the matching error kinds
/// WHY: The banner must describe the actual failure
#[tokio::test]
async fn given_proxy_error_codes_when_submitting_then_matching_errors() {
    // Given: Proxies answering each code
    let missing = spawn_server(fixed_upstream(
        StatusCode::UNAUTHORIZED,
        error_body(ProxyErrorCode::MissingCredential, "no key"),
    ))
    .await;
    let upstream = spawn_server(fixed_upstream(
        StatusCode::BAD_GATEWAY,
        error_body(ProxyErrorCode::UpstreamError, "quota exceeded"),
    ))
    .await;
    let invalid = spawn_server(fixed_upstream(
        StatusCode::BAD_GATEWAY,
        error_body(ProxyErrorCode::InvalidUpstreamResponse, "not json"),
    ))
    .await;
    let empty = spawn_server(fixed_upstream(
        StatusCode::BAD_GATEWAY,
        error_body(ProxyErrorCode::EmptyUpstreamResponse, "nothing"),
    ))
    .await;

    // When: Submitting to each
    let submit = |base: String| async move {
        match ProxyClient::new(base) {
            Ok(client) => client.submit(&payload()).await,
            Err(e) => Err(e),
        }
    };

    // Then: Matching variants
    assert!(matches!(
        submit(missing).await,
        Err(CoreError::MissingCredential { .. })
    ));
    assert!(matches!(
        submit(upstream).await,
        Err(CoreError::Transport { ref reason, .. })
            if reason.contains("502") && reason.contains("quota exceeded")
    ));
    assert!(matches!(
        submit(invalid).await,
        Err(CoreError::MalformedResponse { .. })
    ));
    assert!(matches!(
        submit(empty).await,
        Err(CoreError::EmptyResponse { .. })
    ));
}

/// WHAT: Error bodies that are not JSON still produce an error for the status
/// WHY: Intermediaries may answer with plain text
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_plain_text_error_when_submitting_then_transport_error() {
    let base = spawn_server(fixed_upstream(StatusCode::INTERNAL_SERVER_ERROR, "oops")).await;

    let result = ProxyClient::new(base).unwrap().submit(&payload()).await;

    assert!(matches!(
        result,
        Err(CoreError::Transport { ref reason, .. }) if reason.contains("500")
    ));
}

/// WHAT: An empty 200 body is an empty-response error
/// WHY: Success without a result is not a success
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_empty_success_body_when_submitting_then_empty_response() {
    let base = spawn_server(fixed_upstream(StatusCode::OK, "")).await;

    let result = ProxyClient::new(base).unwrap().submit(&payload()).await;

    assert!(matches!(result, Err(CoreError::EmptyResponse { .. })));
}

fn health(credential_configured: bool) -> String {
    serde_json::to_string(&HealthReport {
        status: "ok".to_string(),
        service: "swara-sethu".to_string(),
        version: "0.1.0".to_string(),
        uptime_seconds: 3,
        credential_configured,
    })
    .unwrap_or_default()
}

/// WHAT: Preflight reports the proxy's credential state
/// WHY: Submission is blocked when the proxy has no key
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_proxy_health_when_preflighting_then_credential_state_checked() {
    // Given: One proxy with a key and one without
    let ready = spawn_server(fixed_upstream(StatusCode::OK, health(true))).await;
    let keyless = spawn_server(fixed_upstream(StatusCode::OK, health(false))).await;

    // When: Preflighting both
    let ready_report = ProxyClient::new(ready).unwrap().preflight().await.unwrap();
    let keyless_result = ProxyClient::new(keyless).unwrap().preflight().await;

    // Then: Ready passes, keyless is a missing credential
    assert!(ready_report.credential_configured);
    assert_eq!(ready_report.status, "ok");
    assert!(matches!(
        keyless_result,
        Err(CoreError::MissingCredential { .. })
    ));
}

/// WHAT: An unreachable or unhealthy proxy fails preflight as a transport error
/// WHY: A network failure is retryable and must not read as a credential problem
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_unreachable_or_unhealthy_proxy_when_preflighting_then_transport() {
    // Given: No proxy at one address and a failing health route at another
    let dead = dead_address().await;
    let unhealthy = spawn_server(fixed_upstream(StatusCode::SERVICE_UNAVAILABLE, "")).await;

    // When: Preflighting both
    let unreachable = ProxyClient::new(dead).unwrap().preflight().await.unwrap_err();
    let failing = ProxyClient::new(unhealthy).unwrap().preflight().await.unwrap_err();

    // Then: Both are transport failures, never credential ones
    for err in [&unreachable, &failing] {
        assert!(matches!(err, CoreError::Transport { .. }));
        assert_eq!(err.kind(), crate::ErrorKind::Transport);
        assert!(err.user_message().starts_with("Analysis failed:"));
    }
}

/// WHAT: Every error maps to a proxy code and back to the same kind
/// WHY: Client and proxy agree on the error taxonomy
#[test]
fn given_core_errors_when_mapping_to_codes_then_kinds_preserved() {
    let missing = ProxyErrorCode::MissingCredential.into_error(401, "no key".to_string());
    let malformed = ProxyErrorCode::InvalidUpstreamResponse.into_error(502, "bad".to_string());

    assert_eq!(
        ProxyErrorCode::for_error(&missing),
        ProxyErrorCode::MissingCredential
    );
    assert_eq!(
        ProxyErrorCode::for_error(&malformed),
        ProxyErrorCode::InvalidUpstreamResponse
    );
    assert_eq!(missing.kind(), crate::ErrorKind::Credential);
}

/// WHAT: Unknown codes deserialize instead of failing
/// WHY: Newer proxies may add codes
#[test]
#[allow(clippy::unwrap_used)]
fn given_unknown_code_when_parsing_error_body_then_unknown() {
    let body: ErrorBody =
        serde_json::from_str(r#"{"error":{"code":"RATE_LIMITED","message":"slow down"}}"#)
            .unwrap();

    assert_eq!(body.error.code, ProxyErrorCode::Unknown);
}
