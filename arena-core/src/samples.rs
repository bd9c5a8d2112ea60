//! Canonical agent logs covering each audit outcome.
//!
//! The set spans the whole verdict range, from a rejected junk submission
//! to a flawless evidence-backed run. Scores are those of the offline
//! heuristic classifier.

use crate::score::StabilityScore;

/// A sample log paired with the verdict the heuristic classifier gives it.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct SampleLog {
    /// Short identifier (e.g. `"hallucinated-dashboard"`).
    pub name: &'static str,
    /// The raw log text.
    pub log: &'static str,
    /// Expected heuristic stability score.
    pub expected_score: StabilityScore,
    /// Expected heuristic healing factor.
    pub expected_healing: &'static str,
}

/// Application context shared by the samples.
pub const SAMPLE_CONTEXT: &str = "The target application is a checkout page. \
The 'Submit' button has a dynamic ID that changes on reload. \
There is a Shadow DOM component for the credit card field.";

/// Returns the canonical sample logs.
#[must_use]
pub fn sample_logs() -> Vec<SampleLog> {
    vec![
        SampleLog {
            name: "evidence-backed-checkout",
            log: "[INFO] Found element #submit (confidence 0.92)\n\
                  [INFO] Clicked\n\
                  [INFO] Waiting for navigation\n\
                  [INFO] URL changed to /confirmation\n\
                  [SUCCESS] Test Passed",
            expected_score: StabilityScore::saturating(100),
            expected_healing: "N/A (Happy Path)",
        },
        SampleLog {
            name: "healed-selector",
            log: "[INFO] Starting test execution...\n\
                  [INFO] Locating button \".submit-btn\"\n\
                  [ERROR] Element not found. Retrying (Attempt 1/3)...\n\
                  [INFO] Self-healing triggered: searching by button text\n\
                  [INFO] Button \"Submit Order\" located. Clicked.\n\
                  [SUCCESS] Test Passed",
            expected_score: StabilityScore::saturating(95),
            expected_healing: "Excellent Semantic Recovery",
        },
        SampleLog {
            name: "hallucinated-dashboard",
            log: "[INFO] Clicking button...\n[SUCCESS] Dashboard loaded.",
            expected_score: StabilityScore::saturating(0),
            expected_healing: "None detected",
        },
        SampleLog {
            name: "catastrophic-abort",
            log: "[CRITICAL] Unrecoverable state\nNo recovery possible",
            expected_score: StabilityScore::saturating(10),
            expected_healing: "Catastrophic Failure",
        },
        SampleLog {
            name: "unresolved-selector",
            log: "[INFO] Locating checkout button\n\
                  [ERROR] Element not found: #checkout-btn\n\
                  [INFO] Giving up after 3 attempts",
            expected_score: StabilityScore::saturating(40),
            expected_healing: "Attempted but failed",
        },
        SampleLog {
            name: "inconclusive-narrative",
            log: "[INFO] Opened the landing page and looked around for a while",
            expected_score: StabilityScore::saturating(50),
            expected_healing: "Unknown",
        },
        SampleLog {
            name: "junk-submission",
            log: "1",
            expected_score: StabilityScore::saturating(0),
            expected_healing: "Invalid Input",
        },
    ]
}
