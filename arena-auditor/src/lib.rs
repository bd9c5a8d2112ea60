//! Trust auditing of autonomous web-testing agent logs.
//!
//! An [`Auditor`] turns a raw agent log into an [`arena_core::AuditResult`]:
//! a pre-flight gate rejects junk, an evidence-based evaluator asks a
//! reasoning service for a verdict, and an ordered heuristic rule table
//! answers whenever the service is absent, rate limited, or unusable.
//! Auditing never fails; every input produces a verdict.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod auditor;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod gate;
pub mod gemini;
pub mod heuristic;
pub mod patterns;
pub mod prompt;
pub mod retry;
pub mod service;

pub use auditor::{AuditMode, AuditReport, AuditRoute, Auditor, FallbackReason};
pub use config::AuditorConfig;
pub use error::{EvaluatorError, ServiceError};
pub use evaluator::{parse_service_response, Evaluation, Evaluator};
pub use gate::{preflight, GateDecision};
pub use gemini::GeminiClient;
pub use heuristic::{Classification, HeuristicClassifier, LogSignals, Rule};
pub use patterns::PatternSet;
pub use retry::{parse_retry_hint, RetryPolicy};
pub use service::ReasoningService;
