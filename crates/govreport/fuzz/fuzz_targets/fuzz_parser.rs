//! Fuzz target for the delimited-text parser.
//!
//! The parser must never panic on malformed input, whatever the delimiter
//! detection decides.

#![no_main]

use govreport::Profiler;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = Profiler::new().profile_str(text);
    }
});
