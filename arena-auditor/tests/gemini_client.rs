//! Integration tests for `GeminiClient` against a mock HTTP server.
//!
//! Covers status mapping (200/401/403/429/5xx), retry-hint extraction from
//! header and body, envelope decoding, and the full `Auditor` fallback when
//! the quota never recovers.

use std::time::Duration;

use arena_auditor::{
    AuditRoute, Auditor, AuditorConfig, FallbackReason, GeminiClient, ReasoningService, RetryPolicy,
    ServiceError,
};
use arena_core::LogInput;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-test";
const GENERATE_PATH: &str = "/v1beta/models/gemini-test:generateContent";

fn client_for(server: &MockServer) -> GeminiClient {
    match GeminiClient::new("test-key", MODEL, server.uri(), Duration::from_secs(5)) {
        Ok(c) => c,
        Err(e) => panic!("client build failed: {e}"),
    }
}

fn candidate(text: &str) -> serde_json::Value {
    json!({ "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }] })
}

#[tokio::test]
async fn success_returns_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_string_contains("hello judge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate("{\"ok\":true}")))
        .expect(1)
        .mount(&server)
        .await;

    let text = match client_for(&server).complete("hello judge").await {
        Ok(t) => t,
        Err(e) => panic!("unexpected error: {e}"),
    };
    assert_eq!(text, "{\"ok\":true}");
}

#[tokio::test]
async fn rate_limit_reads_retry_after_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .mount(&server)
        .await;

    let err = client_for(&server).complete("p").await;
    match err {
        Err(ServiceError::RateLimited { retry_after, .. }) => {
            assert_eq!(retry_after, Some(Duration::from_secs(7)));
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn rate_limit_reads_hint_from_body() {
    let server = MockServer::start().await;
    let body = json!({
        "error": {
            "code": 429,
            "message": "You exceeded your current quota. Please retry in 41.2s.",
            "status": "RESOURCE_EXHAUSTED"
        }
    });
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(body))
        .mount(&server)
        .await;

    match client_for(&server).complete("p").await {
        Err(ServiceError::RateLimited { retry_after, message }) => {
            assert_eq!(retry_after, Some(Duration::from_secs_f64(41.2)));
            assert!(message.contains("RESOURCE_EXHAUSTED"));
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_and_forbidden_map_to_unauthorized() {
    for status in [401, 403] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("p").await;
        assert!(
            matches!(err, Err(ServiceError::Unauthorized(_))),
            "status {status}: got {err:?}"
        );
    }
}

#[tokio::test]
async fn server_error_maps_to_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = client_for(&server).complete("p").await;
    assert!(matches!(err, Err(ServiceError::Http { status: 503, .. })), "got {err:?}");
}

#[tokio::test]
async fn blocked_prompt_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "promptFeedback": { "blockReason": "SAFETY" } })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).complete("p").await;
    assert!(matches!(err, Err(ServiceError::InvalidResponse(_))), "got {err:?}");
}

#[tokio::test]
async fn unreachable_endpoint_is_network_error() {
    let client = match GeminiClient::new("k", MODEL, "http://127.0.0.1:9", Duration::from_secs(2)) {
        Ok(c) => c,
        Err(e) => panic!("client build failed: {e}"),
    };
    let err = client.complete("p").await;
    assert!(matches!(err, Err(ServiceError::Network(_))), "got {err:?}");
}

// ── Through the auditor ──────────────────────────────────────────────────────

fn mock_config(server: &MockServer) -> AuditorConfig {
    let mut retry = RetryPolicy::new(3, Duration::from_millis(1));
    retry.hint_buffer = Duration::ZERO;
    AuditorConfig::default()
        .with_api_key("test-key")
        .with_model(MODEL)
        .with_endpoint(server.uri())
        .with_retry(retry)
}

const HALLUCINATED_LOG: &str = "[INFO] Clicking button...\n[SUCCESS] Dashboard loaded.";

#[tokio::test]
async fn auditor_uses_service_verdict() {
    let server = MockServer::start().await;
    let verdict = "```json\n{\"stability_score\": 12, \"healing_factor\": \"None detected\", \
        \"critical_failures\": [\"No navigation evidence\"], \"verdict\": \"Unverified claim.\"}\n```";
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate(verdict)))
        .expect(1)
        .mount(&server)
        .await;

    let report = Auditor::from_config(&mock_config(&server))
        .audit(&LogInput::new(HALLUCINATED_LOG, "dashboard"))
        .await;
    assert_eq!(report.route, AuditRoute::Evaluator { attempts: 1 });
    assert_eq!(report.result.stability_score.value(), 12);
    assert_eq!(report.result.critical_failures, vec!["No navigation evidence".to_owned()]);
}

#[tokio::test]
async fn auditor_falls_back_after_persistent_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .expect(3)
        .mount(&server)
        .await;

    let report = Auditor::from_config(&mock_config(&server))
        .audit(&LogInput::new(HALLUCINATED_LOG, ""))
        .await;
    assert_eq!(report.route, AuditRoute::Heuristic { reason: FallbackReason::RateLimitExhausted });
    assert_eq!(report.result.stability_score.value(), 0);
    assert!(report.result.critical_failures.iter().any(|f| f == "Hallucinated success state"));
}

#[tokio::test]
async fn auditor_recovers_when_quota_frees_up() {
    let server = MockServer::start().await;
    let verdict = r#"{"stability_score": 3, "healing_factor": "None detected", "critical_failures": ["Hallucinated success state"], "verdict": "No proof."}"#;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate(verdict)))
        .expect(1)
        .mount(&server)
        .await;

    let report = Auditor::from_config(&mock_config(&server))
        .audit(&LogInput::new(HALLUCINATED_LOG, ""))
        .await;
    assert_eq!(report.route, AuditRoute::Evaluator { attempts: 3 });
    assert_eq!(report.result.stability_score.value(), 3);
}
