//! Fuzz target for column type classification.

#![no_main]

use arbitrary::Arbitrary;
use govreport::{ColumnTypeClassifier, RawValue};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Cell {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<Cell> for RawValue {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Null => RawValue::Null,
            Cell::Bool(b) => RawValue::Bool(b),
            Cell::Integer(i) => RawValue::Integer(i),
            Cell::Float(f) => RawValue::Float(f),
            Cell::Text(s) => RawValue::Text(s),
        }
    }
}

fuzz_target!(|cells: Vec<Cell>| {
    let values: Vec<RawValue> = cells.into_iter().map(RawValue::from).collect();
    let profile = ColumnTypeClassifier::new().profile_column("fuzz", &values);

    let stats = profile.stats();
    assert!(stats.null_count <= stats.total_count);
    if let (Some(min), Some(mean), Some(max)) = (stats.min, stats.mean, stats.max) {
        assert!(min <= mean && mean <= max);
    }
});
