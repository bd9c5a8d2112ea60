//! Pre-flight gate: cheap structural checks run before any reasoning call.

use arena_core::{AuditResult, StabilityScore};

use crate::patterns::{contains_any, PatternSet};

/// Where a log goes after the pre-flight checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Degenerate input; answer with [`invalid_input`] immediately.
    Reject,
    /// Too short and unstructured to spend a service call on.
    Heuristic,
    /// Eligible for the evidence-based evaluator.
    Evaluate,
}

/// Classify a raw log before auditing.
#[must_use]
pub fn preflight(log: &str, patterns: &PatternSet) -> GateDecision {
    if is_junk(log, patterns) {
        return GateDecision::Reject;
    }
    let short = log.chars().count() < patterns.structured_min_chars;
    if short && !contains_any(log, &patterns.structure_markers) {
        return GateDecision::Heuristic;
    }
    GateDecision::Evaluate
}

/// `true` for logs too short, trivial, or whitespace-free to mean anything.
#[must_use]
pub fn is_junk(log: &str, patterns: &PatternSet) -> bool {
    log.chars().count() < patterns.min_log_chars
        || patterns.trivial_tokens.iter().any(|t| t == log.trim())
        || !log.chars().any(char::is_whitespace)
}

/// The fixed verdict for rejected input.
#[must_use]
pub fn invalid_input() -> AuditResult {
    AuditResult::new(
        StabilityScore::MIN,
        "Invalid Input",
        vec![
            "Input too short".to_owned(),
            "Logs appear meaningless (Junk Data)".to_owned(),
        ],
        "The submission was rejected as invalid junk data.",
    )
}
