//! Text patterns and thresholds driving the gate and the heuristic classifier.

use serde::{Deserialize, Serialize};

/// The configurable vocabulary of log evidence.
///
/// Markers listed as case-sensitive are matched verbatim; the rest are
/// matched against the lowercased log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct PatternSet {
    /// Logs with fewer characters are rejected as junk.
    pub min_log_chars: usize,
    /// Logs with fewer characters and no structure marker skip the evaluator.
    pub structured_min_chars: usize,
    /// Whole-log contents (after trimming) rejected as junk.
    pub trivial_tokens: Vec<String>,
    /// Tokens that mark a log as structured. Case-sensitive.
    pub structure_markers: Vec<String>,
    /// Claims of a successful run. Case-sensitive.
    pub success_markers: Vec<String>,
    /// Signs of self-healing. Case-insensitive.
    pub healing_words: Vec<String>,
    /// Proof of a verifiable technical action. Case-insensitive.
    pub evidence_keywords: Vec<String>,
    /// Markers that only count as evidence when all of them appear. Case-sensitive.
    pub evidence_conjunction: Vec<String>,
    /// Unrecoverable failure markers. Case-sensitive.
    pub critical_markers: Vec<String>,
    /// Error markers. Case-sensitive.
    pub error_markers: Vec<String>,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self {
            min_log_chars: 50,
            structured_min_chars: 80,
            trivial_tokens: owned(&["1"]),
            structure_markers: owned(&["[INFO]", "[ERROR]", "[SUCCESS]", "[CRITICAL]", "Test"]),
            success_markers: owned(&["[SUCCESS]", "Test Passed"]),
            healing_words: owned(&["healing", "recovered", "recovery"]),
            evidence_keywords: owned(&[
                "found element",
                "url changed",
                "confidence:",
                "confidence :",
                "selector match",
                "scanned dom",
                "scanning dom",
            ]),
            evidence_conjunction: owned(&["Order ID", "/confirmation"]),
            critical_markers: owned(&["[CRITICAL]", "No recovery possible"]),
            error_markers: owned(&["[ERROR]", "Exception"]),
        }
    }
}

impl PatternSet {
    /// Replace the evidence keyword list.
    #[must_use]
    pub fn with_evidence_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.evidence_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the junk threshold.
    #[must_use]
    pub fn with_min_log_chars(mut self, min_log_chars: usize) -> Self {
        self.min_log_chars = min_log_chars;
        self
    }
}

/// `true` if `haystack` contains any of `needles` verbatim.
pub(crate) fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}

/// `true` if the already-lowercased `haystack` contains any needle, ignoring case.
pub(crate) fn contains_any_folded(lower_haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|n| lower_haystack.contains(n.to_lowercase().as_str()))
}

/// `true` if `haystack` contains every needle. An empty list never matches.
pub(crate) fn contains_all(haystack: &str, needles: &[String]) -> bool {
    !needles.is_empty() && needles.iter().all(|n| haystack.contains(n.as_str()))
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}
