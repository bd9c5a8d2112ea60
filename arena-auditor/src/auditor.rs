//! Top-level audit entry point.
//!
//! Routes each log through the pre-flight gate, the evidence-based
//! evaluator when a reasoning service is configured, and the heuristic
//! classifier on any failure. [`Auditor::evaluate`] is total: it never
//! returns an error and never panics on any input.

use std::fmt;
use std::sync::Arc;

use arena_core::{AuditResult, LogDigest, LogInput};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::gate::{self, GateDecision};
use crate::{AuditorConfig, EvaluatorError, Evaluator, GeminiClient, HeuristicClassifier, ReasoningService};

/// Which engine an auditor will try first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditMode {
    /// A reasoning service is configured.
    Evaluator,
    /// No service; every log goes to the heuristic classifier.
    Heuristic,
}

/// Why a log was classified by the heuristic classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum FallbackReason {
    /// Short and unstructured; not worth a service call.
    Unstructured,
    /// No reasoning service configured.
    Unconfigured,
    /// Every attempt in the retry budget was rate limited.
    RateLimitExhausted,
    /// The service failed with a non-retryable error.
    ServiceError,
    /// The service reply was not a valid verdict.
    MalformedResponse,
}

impl From<&EvaluatorError> for FallbackReason {
    fn from(e: &EvaluatorError) -> Self {
        match e {
            EvaluatorError::MaxRetriesExceeded { .. } => Self::RateLimitExhausted,
            EvaluatorError::Service(_) => Self::ServiceError,
            EvaluatorError::MalformedResponse { .. } => Self::MalformedResponse,
        }
    }
}

/// The path that produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum AuditRoute {
    /// Rejected by the pre-flight gate.
    Rejected,
    /// Classified offline.
    Heuristic {
        /// Why the evaluator was not used.
        reason: FallbackReason,
    },
    /// Judged by the reasoning service.
    Evaluator {
        /// Service attempts used.
        attempts: u32,
    },
}

impl fmt::Display for AuditRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected => write!(f, "rejected"),
            Self::Heuristic { reason } => write!(f, "heuristic ({reason:?})"),
            Self::Evaluator { attempts } => write!(f, "evaluator ({attempts} attempts)"),
        }
    }
}

/// A verdict with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct AuditReport {
    /// The verdict.
    pub result: AuditResult,
    /// How the verdict was reached.
    pub route: AuditRoute,
    /// Digest of the audited log.
    #[serde(serialize_with = "serialize_digest")]
    pub log_digest: LogDigest,
    /// When the audit completed.
    pub evaluated_at: DateTime<Utc>,
}

fn serialize_digest<S: serde::Serializer>(digest: &LogDigest, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(digest)
}

/// Audits agent execution logs.
///
/// Holds no mutable state; one auditor can serve any number of
/// concurrent audits.
#[derive(Clone)]
pub struct Auditor {
    service: Option<Arc<dyn ReasoningService>>,
    evaluator: Evaluator,
    classifier: HeuristicClassifier,
}

impl fmt::Debug for Auditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auditor")
            .field("service", &self.service.as_ref().map(|s| s.provider_name()))
            .field("evaluator", &self.evaluator)
            .field("classifier", &self.classifier)
            .finish()
    }
}

impl Auditor {
    /// Create an auditor that never calls a reasoning service.
    #[must_use]
    pub fn offline(config: &AuditorConfig) -> Self {
        Self {
            service: None,
            evaluator: Evaluator::new(config.retry),
            classifier: HeuristicClassifier::new(config.patterns.clone()),
        }
    }

    /// Create an auditor backed by the given reasoning service.
    #[must_use]
    pub fn with_service(config: &AuditorConfig, service: Arc<dyn ReasoningService>) -> Self {
        Self { service: Some(service), ..Self::offline(config) }
    }

    /// Create an auditor from configuration.
    ///
    /// With a credential, a [`GeminiClient`] is built; without one, or if
    /// the client cannot be built, the auditor runs offline.
    #[must_use]
    pub fn from_config(config: &AuditorConfig) -> Self {
        let Some(api_key) = config.api_key.as_deref() else {
            tracing::warn!("no reasoning-service credential; using heuristic classifier only");
            return Self::offline(config);
        };
        match GeminiClient::new(api_key, &config.model, &config.endpoint, config.request_timeout) {
            Ok(client) => {
                tracing::info!(model = %config.model, "reasoning service configured");
                Self::with_service(config, Arc::new(client))
            }
            Err(e) => {
                tracing::warn!(error = %e, "reasoning service unavailable; using heuristic classifier only");
                Self::offline(config)
            }
        }
    }

    /// Which engine this auditor tries first.
    #[must_use]
    pub fn mode(&self) -> AuditMode {
        if self.service.is_some() {
            AuditMode::Evaluator
        } else {
            AuditMode::Heuristic
        }
    }

    /// The heuristic classifier used for fallbacks.
    #[must_use]
    pub fn classifier(&self) -> &HeuristicClassifier {
        &self.classifier
    }

    /// Audit a log and return only the verdict.
    pub async fn evaluate(&self, log: &str, context: &str) -> AuditResult {
        self.audit_parts(log, context).await.result
    }

    /// Audit a log and return the verdict with its provenance.
    pub async fn audit(&self, input: &LogInput) -> AuditReport {
        self.audit_parts(&input.log, &input.context).await
    }

    async fn audit_parts(&self, log: &str, context: &str) -> AuditReport {
        let log_digest = LogDigest::of(log);
        let (result, route) = self.route(log, context, &log_digest).await;

        tracing::info!(
            log_digest = %log_digest.short(),
            %route,
            score = %result.stability_score,
            failures = result.critical_failures.len(),
            "audit complete"
        );

        AuditReport { result, route, log_digest, evaluated_at: Utc::now() }
    }

    async fn route(&self, log: &str, context: &str, digest: &LogDigest) -> (AuditResult, AuditRoute) {
        let decision = gate::preflight(log, self.classifier.patterns());
        tracing::debug!(log_digest = %digest.short(), ?decision, "pre-flight gate");

        match decision {
            GateDecision::Reject => return (gate::invalid_input(), AuditRoute::Rejected),
            GateDecision::Heuristic => {
                return self.fallback(log, FallbackReason::Unstructured);
            }
            GateDecision::Evaluate => {}
        }

        let Some(service) = self.service.as_deref() else {
            return self.fallback(log, FallbackReason::Unconfigured);
        };

        match self.evaluator.evaluate(service, log, context).await {
            Ok(evaluation) => (evaluation.result, AuditRoute::Evaluator { attempts: evaluation.attempts }),
            Err(e) => {
                tracing::warn!(
                    log_digest = %digest.short(),
                    provider = service.provider_name(),
                    error = %e,
                    "evaluator failed; falling back to heuristic classifier"
                );
                self.fallback(log, FallbackReason::from(&e))
            }
        }
    }

    fn fallback(&self, log: &str, reason: FallbackReason) -> (AuditResult, AuditRoute) {
        (self.classifier.classify(log), AuditRoute::Heuristic { reason })
    }
}
