//! Fuzz target: JSON deserialization of the audit request body.
//!
//! Verifies that arbitrary byte sequences fed to the `LogInput` decoder
//! never panic, and that any decoded input survives a re-encode.
#![no_main]

use arena_core::LogInput;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = serde_json::from_slice::<LogInput>(data) else {
        return;
    };
    let encoded = serde_json::to_vec(&input);
    assert!(encoded.is_ok(), "decoded input must re-encode");
});
