use serde::{Deserialize, Serialize};

use crate::score::StabilityScore;

/// The trust verdict for a single agent execution log.
///
/// Audit results are immutable values. A non-empty `critical_failures`
/// list is the signal callers use to flag a run as failed or hallucinated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct AuditResult {
    /// How well the log supports its own claims.
    pub stability_score: StabilityScore,
    /// Description of any self-healing behaviour observed (e.g. `"N/A"`).
    pub healing_factor: String,
    /// Short failure categories, most severe first. Empty when none were found.
    pub critical_failures: Vec<String>,
    /// Natural-language judgement.
    pub verdict: String,
}

impl AuditResult {
    /// Create a new audit result.
    ///
    /// # Arguments
    /// - `stability_score`: confidence in `[0, 100]`
    /// - `healing_factor`: observed recovery behaviour
    /// - `critical_failures`: ordered failure categories
    /// - `verdict`: prose judgement
    #[must_use]
    pub fn new(
        stability_score: StabilityScore,
        healing_factor: impl Into<String>,
        critical_failures: Vec<String>,
        verdict: impl Into<String>,
    ) -> Self {
        Self {
            stability_score,
            healing_factor: healing_factor.into(),
            critical_failures,
            verdict: verdict.into(),
        }
    }

    /// Returns `true` if any critical failure was recorded.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.critical_failures.is_empty()
    }
}

/// An execution log submitted for auditing.
///
/// Consumed by the auditor and never persisted by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct LogInput {
    /// Raw log text, structured (`[INFO]`, `[SUCCESS]`, ...) or free-form.
    pub log: String,
    /// Description of the target application or scenario.
    #[serde(default)]
    pub context: String,
}

impl LogInput {
    /// Create a log input from any string-like values.
    pub fn new(log: impl Into<String>, context: impl Into<String>) -> Self {
        Self { log: log.into(), context: context.into() }
    }
}
