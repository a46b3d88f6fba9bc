//! Fuzz target for column name resolution.

#![no_main]

use govreport::ColumnNameResolver;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (String, Vec<String>)| {
    let (target, candidates) = input;
    let resolver = ColumnNameResolver::new(candidates.iter().map(String::as_str));

    if let Some(found) = resolver.resolve(&target) {
        assert!(candidates.iter().any(|c| c == found.column));
    }
});
