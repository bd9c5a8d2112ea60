//! Fuzz target: heuristic classification.
//!
//! Any byte sequence, decoded lossily, must classify without panicking and
//! yield a score in [0, 100] from a named rule.
#![no_main]

use arena_auditor::{preflight, GateDecision, HeuristicClassifier, PatternSet};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let log = String::from_utf8_lossy(data);
    let classifier = HeuristicClassifier::default();
    let classification = classifier.classify_with_rule(&log);

    assert!(classification.result.stability_score.value() <= 100);
    assert!(HeuristicClassifier::rules().iter().any(|r| r.name == classification.rule));

    if preflight(&log, &PatternSet::default()) == GateDecision::Reject {
        assert_eq!(classification.rule, "invalid-input");
    }
});
