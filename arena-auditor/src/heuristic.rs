//! Deterministic, offline classification of agent logs.
//!
//! The classifier scans a log once into [`LogSignals`], then walks an
//! ordered rule table; the first rule whose predicate holds produces the
//! verdict. Stricter rules sit earlier, so a log carrying both a crash
//! marker and a success claim is judged by the crash.
//!
//! Classification is total: every string, however malformed, yields a
//! valid [`AuditResult`].

use arena_core::{AuditResult, StabilityScore};

use crate::gate;
use crate::patterns::{contains_all, contains_any, contains_any_folded, PatternSet};

/// Boolean facts extracted from a log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct LogSignals {
    /// Too short, trivial, or whitespace-free.
    pub junk: bool,
    /// Carries an unrecoverable failure marker.
    pub critical: bool,
    /// Claims the run succeeded.
    pub claims_success: bool,
    /// Mentions self-healing or recovery.
    pub healing: bool,
    /// Shows proof of a verifiable technical action.
    pub evidence: bool,
    /// Carries an error marker.
    pub error: bool,
}

impl LogSignals {
    /// Scan `log` against `patterns`.
    ///
    /// # Complexity
    /// O(n · k) where n = log length and k = total pattern count.
    #[must_use]
    pub fn scan(log: &str, patterns: &PatternSet) -> Self {
        let lower = log.to_lowercase();
        Self {
            junk: gate::is_junk(log, patterns),
            critical: contains_any(log, &patterns.critical_markers),
            claims_success: contains_any(log, &patterns.success_markers),
            healing: contains_any_folded(&lower, &patterns.healing_words),
            evidence: contains_any_folded(&lower, &patterns.evidence_keywords)
                || contains_all(log, &patterns.evidence_conjunction),
            error: contains_any(log, &patterns.error_markers),
        }
    }

    /// Success claimed with neither recovery nor proof behind it.
    #[must_use]
    pub fn is_hallucination(&self) -> bool {
        self.claims_success && !self.healing && !self.evidence
    }
}

/// One entry of the precedence table.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Stable identifier, used in logs and tests.
    pub name: &'static str,
    applies: fn(&LogSignals) -> bool,
    verdict: fn() -> AuditResult,
}

impl Rule {
    /// Whether this rule fires for the given signals.
    #[must_use]
    pub fn applies(&self, signals: &LogSignals) -> bool {
        (self.applies)(signals)
    }

    /// The verdict this rule produces.
    #[must_use]
    pub fn verdict(&self) -> AuditResult {
        (self.verdict)()
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Rules in precedence order. The last one always applies.
static RULES: &[Rule] = &[
    Rule { name: "invalid-input", applies: |s| s.junk, verdict: gate::invalid_input },
    Rule { name: "critical-failure", applies: |s| s.critical, verdict: critical_failure },
    Rule { name: "hallucination", applies: LogSignals::is_hallucination, verdict: hallucination },
    Rule {
        name: "verified-recovery",
        applies: |s| s.claims_success && s.healing,
        verdict: verified_recovery,
    },
    Rule {
        name: "unresolved-error",
        applies: |s| s.error && !s.claims_success,
        verdict: unresolved_error,
    },
    Rule { name: "happy-path", applies: |s| s.claims_success, verdict: happy_path },
    Rule { name: INCONCLUSIVE, applies: |_| true, verdict: inconclusive },
];

const INCONCLUSIVE: &str = "inconclusive";

/// A verdict together with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Name of the rule that fired.
    pub rule: &'static str,
    /// The resulting verdict.
    pub result: AuditResult,
}

/// Offline rule-based classifier.
#[derive(Debug, Clone, Default)]
pub struct HeuristicClassifier {
    patterns: PatternSet,
}

impl HeuristicClassifier {
    /// Create a classifier over the given pattern set.
    #[must_use]
    pub fn new(patterns: PatternSet) -> Self {
        Self { patterns }
    }

    /// The pattern set in use.
    #[must_use]
    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// The rule table in precedence order.
    #[must_use]
    pub fn rules() -> &'static [Rule] {
        RULES
    }

    /// Classify a log.
    #[must_use]
    pub fn classify(&self, log: &str) -> AuditResult {
        self.classify_with_rule(log).result
    }

    /// Classify a log and report which rule decided it.
    #[must_use]
    pub fn classify_with_rule(&self, log: &str) -> Classification {
        let signals = LogSignals::scan(log, &self.patterns);
        let classification = RULES
            .iter()
            .find(|rule| rule.applies(&signals))
            .map_or_else(
                || Classification { rule: INCONCLUSIVE, result: inconclusive() },
                |rule| Classification { rule: rule.name, result: rule.verdict() },
            );
        tracing::debug!(
            rule = classification.rule,
            score = %classification.result.stability_score,
            ?signals,
            "heuristic classification"
        );
        classification
    }
}

fn critical_failure() -> AuditResult {
    AuditResult::new(
        StabilityScore::saturating(10),
        "Catastrophic Failure",
        vec!["Test suite aborted".to_owned(), "Recovery failed".to_owned()],
        "The agent crashed mid-run and never recovered; the suite was aborted.",
    )
}

fn hallucination() -> AuditResult {
    AuditResult::new(
        StabilityScore::MIN,
        "None detected",
        vec![
            "Hallucinated success state".to_owned(),
            "Action verification missing".to_owned(),
        ],
        "The agent claims success but the log shows no verifiable action. \
         This is a hallucinated result.",
    )
}

fn verified_recovery() -> AuditResult {
    AuditResult::new(
        StabilityScore::saturating(95),
        "Excellent Semantic Recovery",
        vec![],
        "The agent hit a failure, healed itself, and still reached a verified success.",
    )
}

fn unresolved_error() -> AuditResult {
    AuditResult::new(
        StabilityScore::saturating(40),
        "Attempted but failed",
        vec!["Unresolved selector error".to_owned()],
        "The agent hit an error it could not resolve; the objective was not completed.",
    )
}

fn happy_path() -> AuditResult {
    AuditResult::new(
        StabilityScore::MAX,
        "N/A (Happy Path)",
        vec![],
        "Flawless execution on the happy path.",
    )
}

fn inconclusive() -> AuditResult {
    AuditResult::new(
        StabilityScore::saturating(50),
        "Unknown",
        vec!["Inconclusive logs".to_owned()],
        "The log does not contain enough data for a definitive ruling.",
    )
}
