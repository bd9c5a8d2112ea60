//! Fuzz target: decoding of reasoning-service replies.
//!
//! Arbitrary reply text must either decode to a verdict with an in-range
//! score or be rejected; it must never panic.
#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(result) = arena_auditor::parse_service_response(text) {
        assert!(result.stability_score.value() <= 100);
    }
});
