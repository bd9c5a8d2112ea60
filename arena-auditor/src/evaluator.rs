//! Evidence-based evaluator: asks a reasoning service for a verdict.
//!
//! The evaluator:
//! 1. Builds the judging prompt from the log and context
//! 2. Calls the service, retrying with linear backoff on rate limits only
//! 3. Strips markdown fences from the reply and decodes the verdict JSON
//!
//! Every failure is returned as an [`EvaluatorError`]; the caller decides
//! how to fall back.

use arena_core::{AuditResult, StabilityScore};
use serde::Deserialize;

use crate::prompt::build_prompt;
use crate::{EvaluatorError, ReasoningService, RetryPolicy};

/// A verdict obtained from the reasoning service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// The decoded verdict.
    pub result: AuditResult,
    /// Attempts used, including the successful one.
    pub attempts: u32,
}

/// Service-backed evaluator with quota-aware retry.
///
/// # Cancel Safety
/// Cancel safe. Dropping the future abandons the in-flight request or
/// backoff sleep; no state is kept between evaluations.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    retry: RetryPolicy,
}

impl Evaluator {
    /// Create an evaluator with the given retry policy.
    #[must_use]
    pub fn new(retry: RetryPolicy) -> Self {
        Self { retry }
    }

    /// The retry policy in use.
    #[must_use]
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Judge a log through the service.
    ///
    /// # Errors
    /// Returns [`EvaluatorError::MaxRetriesExceeded`] when every attempt was
    /// rate limited, [`EvaluatorError::Service`] on any other service
    /// failure, and [`EvaluatorError::MalformedResponse`] when the reply is
    /// not a valid verdict.
    pub async fn evaluate(
        &self,
        service: &dyn ReasoningService,
        log: &str,
        context: &str,
    ) -> Result<Evaluation, EvaluatorError> {
        let prompt = build_prompt(log, context);
        let (text, attempts) = self.complete_with_retry(service, &prompt).await?;
        let result = parse_service_response(&text)?;
        Ok(Evaluation { result, attempts })
    }

    /// Call the service, retrying rate-limited attempts.
    ///
    /// Returns the response text and the number of attempts used.
    ///
    /// # Errors
    /// See [`Evaluator::evaluate`].
    pub async fn complete_with_retry(
        &self,
        service: &dyn ReasoningService,
        prompt: &str,
    ) -> Result<(String, u32), EvaluatorError> {
        let max_attempts = self.retry.attempts();

        for attempt in 1..=max_attempts {
            match service.complete(prompt).await {
                Ok(text) => return Ok((text, attempt)),
                Err(crate::ServiceError::RateLimited { retry_after, .. }) => {
                    if attempt == max_attempts {
                        break;
                    }
                    let delay = self.retry.delay_for(attempt, retry_after);
                    tracing::warn!(
                        provider = service.provider_name(),
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis(),
                        "reasoning service rate limited; backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(EvaluatorError::Service(e)),
            }
        }

        Err(EvaluatorError::MaxRetriesExceeded { attempts: max_attempts })
    }
}

/// Verdict as emitted by the service, before validation.
#[derive(Debug, Deserialize)]
struct ServiceVerdict {
    stability_score: f64,
    healing_factor: String,
    critical_failures: Vec<String>,
    verdict: String,
}

/// Decode a service reply into an [`AuditResult`].
///
/// Markdown code fences are stripped before decoding. Extra fields are
/// ignored; a missing field, a non-numeric score, or a score outside
/// `[0, 100]` is rejected.
///
/// # Errors
/// Returns [`EvaluatorError::MalformedResponse`] describing the defect.
pub fn parse_service_response(text: &str) -> Result<AuditResult, EvaluatorError> {
    let cleaned = strip_code_fences(text);
    let raw: ServiceVerdict = serde_json::from_str(&cleaned)
        .map_err(|e| EvaluatorError::MalformedResponse { reason: e.to_string() })?;
    let score = StabilityScore::from_f64(raw.stability_score)
        .map_err(|e| EvaluatorError::MalformedResponse { reason: e.to_string() })?;
    Ok(AuditResult::new(score, raw.healing_factor, raw.critical_failures, raw.verdict))
}

/// Remove ```` ```json ```` and ```` ``` ```` fence markers and trim.
fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_owned()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::ServiceError;

    const VALID: &str = r#"{"stability_score": 92, "healing_factor": "N/A",
        "critical_failures": [], "verdict": "Verified."}"#;

    /// Replays a fixed script of responses, then repeats the last one.
    struct ScriptedService {
        script: Mutex<Vec<Result<String, ServiceError>>>,
        calls: AtomicU32,
    }

    impl ScriptedService {
        fn new(mut script: Vec<Result<String, ServiceError>>) -> Self {
            script.reverse();
            Self { script: Mutex::new(script), calls: AtomicU32::new(0) }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReasoningService for ScriptedService {
        async fn complete(&self, _prompt: &str) -> Result<String, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut script = match self.script.lock() {
                Ok(s) => s,
                Err(e) => panic!("script lock poisoned: {e}"),
            };
            if script.len() > 1 {
                script.pop().unwrap_or_else(|| Err(ServiceError::Network("empty".to_owned())))
            } else {
                script.last().cloned().unwrap_or_else(|| Err(ServiceError::Network("empty".to_owned())))
            }
        }

        fn provider_name(&self) -> &'static str {
            "scripted"
        }
    }

    fn rate_limited() -> Result<String, ServiceError> {
        Err(ServiceError::RateLimited { retry_after: None, message: "quota".to_owned() })
    }

    fn fast_evaluator() -> Evaluator {
        Evaluator::new(RetryPolicy::new(3, Duration::from_millis(1)))
    }

    #[test]
    fn parse_accepts_plain_json() {
        let r = match parse_service_response(VALID) {
            Ok(r) => r,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(r.stability_score.value(), 92);
        assert!(r.critical_failures.is_empty());
    }

    #[test]
    fn parse_strips_markdown_fences() {
        let fenced = format!("```json\n{VALID}\n```\n");
        assert!(parse_service_response(&fenced).is_ok());
        let bare = format!("```\n{VALID}\n```");
        assert!(parse_service_response(&bare).is_ok());
    }

    #[test]
    fn parse_rounds_fractional_scores() {
        let text = r#"{"stability_score": 64.6, "healing_factor": "partial",
            "critical_failures": ["flaky"], "verdict": "meh"}"#;
        let r = match parse_service_response(text) {
            Ok(r) => r,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(r.stability_score.value(), 65);
    }

    #[test]
    fn parse_ignores_extra_fields() {
        let text = r#"{"stability_score": 10, "healing_factor": "x",
            "critical_failures": [], "verdict": "v", "confidence": 0.4}"#;
        assert!(parse_service_response(text).is_ok());
    }

    #[test]
    fn parse_rejects_out_of_range_score() {
        let text = r#"{"stability_score": 140, "healing_factor": "x",
            "critical_failures": [], "verdict": "v"}"#;
        assert!(matches!(
            parse_service_response(text),
            Err(EvaluatorError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn parse_rejects_missing_field_and_prose() {
        let missing = r#"{"stability_score": 10, "verdict": "v"}"#;
        assert!(parse_service_response(missing).is_err());
        assert!(parse_service_response("I think this run looks fine.").is_err());
        assert!(parse_service_response("").is_err());
    }

    #[tokio::test]
    async fn success_on_first_attempt() {
        let service = ScriptedService::new(vec![Ok(VALID.to_owned())]);
        let eval = match fast_evaluator().evaluate(&service, "[INFO] log", "ctx").await {
            Ok(e) => e,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(eval.attempts, 1);
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test]
    async fn rate_limit_then_success_retries() {
        let service = ScriptedService::new(vec![rate_limited(), rate_limited(), Ok(VALID.to_owned())]);
        let eval = match fast_evaluator().evaluate(&service, "[INFO] log", "ctx").await {
            Ok(e) => e,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(eval.attempts, 3);
        assert_eq!(eval.result.stability_score.value(), 92);
    }

    #[tokio::test]
    async fn three_rate_limits_exhaust_budget() {
        let service = ScriptedService::new(vec![rate_limited()]);
        let result = fast_evaluator().evaluate(&service, "[INFO] log", "ctx").await;
        assert_eq!(result, Err(EvaluatorError::MaxRetriesExceeded { attempts: 3 }));
        assert_eq!(service.calls(), 3, "must stop after the attempt budget");
    }

    #[tokio::test]
    async fn non_quota_error_aborts_immediately() {
        let service = ScriptedService::new(vec![
            Err(ServiceError::Http { status: 503, message: "unavailable".to_owned() }),
            Ok(VALID.to_owned()),
        ]);
        let result = fast_evaluator().evaluate(&service, "[INFO] log", "ctx").await;
        assert!(matches!(result, Err(EvaluatorError::Service(ServiceError::Http { status: 503, .. }))));
        assert_eq!(service.calls(), 1, "non-quota errors must not be retried");
    }

    #[tokio::test]
    async fn malformed_reply_is_reported() {
        let service = ScriptedService::new(vec![Ok("not json at all".to_owned())]);
        let result = fast_evaluator().evaluate(&service, "[INFO] log", "ctx").await;
        assert!(matches!(result, Err(EvaluatorError::MalformedResponse { .. })));
    }

    proptest::proptest! {
        #[test]
        fn proptest_parse_never_panics(text in proptest::prelude::any::<String>()) {
            let _ = parse_service_response(&text);
        }
    }
}
