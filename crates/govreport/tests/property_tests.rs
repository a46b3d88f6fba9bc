//! Property-based tests for GovReport.
//!
//! These tests check the guarantees that must hold for arbitrary inputs,
//! not just the hand-picked fixtures of the integration tests.
//!
//! # Testing Philosophy
//!
//! - **Classification**: numeric columns stay numeric, their statistics stay
//!   ordered, and the same values always yield the same type
//! - **Validation**: every reference to a missing column is reported exactly
//!   once, and nothing else is
//! - **Suggestion**: adding a column whose name matches a pattern never
//!   lowers that pattern's confidence
//! - **Robustness**: parsing and resolving arbitrary text never panics

use proptest::prelude::*;

use govreport::spec::{AxisSpec, ChartSeries, ChartSpec, ChartType, Kpi, MetricKind, TableSpec};
use govreport::{
    ColumnNameResolver, ColumnProfile, ColumnType, ColumnTypeClassifier, DataProfile, Dataset,
    Parser, RawValue, ReportSpec, ReportTypeSuggester, validate_spec,
};

// =============================================================================
// Strategies
// =============================================================================

/// Finite decimal numbers as they would appear in an export.
fn numeric_text() -> impl Strategy<Value = String> {
    prop_oneof![
        (-1_000_000i64..1_000_000).prop_map(|n| n.to_string()),
        (-1_000_000i64..1_000_000, 0u32..100).prop_map(|(whole, cents)| {
            let sign = if whole < 0 { "-" } else { "" };
            format!("{}{}.{:02}", sign, whole.abs(), cents)
        }),
    ]
}

/// Dollar amounts with thousands separators.
fn currency_text() -> impl Strategy<Value = String> {
    (0u64..10_000_000).prop_map(|n| {
        let digits = n.to_string();
        let mut grouped = String::new();
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        format!("${}", grouped)
    })
}

/// Any mix of cell values a messy spreadsheet might contain.
fn any_cell() -> impl Strategy<Value = RawValue> {
    prop_oneof![
        Just(RawValue::Null),
        any::<bool>().prop_map(RawValue::Bool),
        any::<i64>().prop_map(RawValue::Integer),
        (-1e9f64..1e9).prop_map(RawValue::Float),
        numeric_text().prop_map(RawValue::Text),
        currency_text().prop_map(RawValue::Text),
        "[a-zA-Z ]{0,12}".prop_map(RawValue::Text),
        "20[0-9]{2}-[01][0-9]-[0-3][0-9]".prop_map(RawValue::Text),
        "-?[0-9]{1,3}(\\.[0-9])?%".prop_map(RawValue::Text),
    ]
}

/// Column names that never contain a report-pattern synonym.
fn neutral_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["alpha", "bravo", "charlie", "notes", "code", "label", "zone"])
        .prop_map(str::to_string)
}

/// Every required synonym of every built-in pattern.
fn required_synonym() -> impl Strategy<Value = String> {
    let synonyms: Vec<String> = ReportTypeSuggester::new()
        .catalog()
        .iter()
        .flat_map(|(_, pattern)| pattern.required_columns.iter().flatten().cloned())
        .collect();
    prop::sample::select(synonyms)
}

fn profile_of(columns: &[(String, Vec<RawValue>)]) -> DataProfile {
    DataProfile::new(
        columns
            .iter()
            .map(|(name, values)| ColumnProfile::from_values(name.clone(), values))
            .collect(),
    )
}

// =============================================================================
// Classification Properties
// =============================================================================

mod classification_props {
    use super::*;

    proptest! {
        #[test]
        fn numeric_columns_have_ordered_stats(
            values in prop::collection::vec(numeric_text(), 1..60)
        ) {
            let raw: Vec<RawValue> = values.into_iter().map(RawValue::Text).collect();
            let profile = ColumnProfile::from_values("amount", &raw);

            prop_assert_eq!(profile.column_type(), ColumnType::Number);

            let stats = profile.stats();
            let min = stats.min.unwrap();
            let max = stats.max.unwrap();
            let mean = stats.mean.unwrap();
            prop_assert!(min <= mean && mean <= max);
        }

        #[test]
        fn currency_wins_over_number(values in prop::collection::vec(currency_text(), 1..40)) {
            let raw: Vec<RawValue> = values.into_iter().map(RawValue::Text).collect();
            prop_assert_eq!(ColumnTypeClassifier::new().classify(&raw), ColumnType::Currency);
        }

        #[test]
        fn classification_is_deterministic(values in prop::collection::vec(any_cell(), 0..50)) {
            let classifier = ColumnTypeClassifier::new();
            let first = classifier.profile_column("col", &values);
            let second = classifier.profile_column("col", &values);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn stats_never_count_more_nulls_than_values(
            values in prop::collection::vec(any_cell(), 0..50)
        ) {
            let profile = ColumnProfile::from_values("col", &values);
            let stats = profile.stats();
            prop_assert_eq!(stats.total_count, values.len());
            prop_assert!(stats.null_count <= stats.total_count);
            prop_assert!(profile.sample_values().len() <= 5);
        }
    }
}

// =============================================================================
// Profile Properties
// =============================================================================

mod profile_props {
    use super::*;

    proptest! {
        #[test]
        fn dictionary_form_round_trips(
            columns in prop::collection::vec(
                (neutral_name(), prop::collection::vec(any_cell(), 5)),
                1..6,
            )
        ) {
            let profile = profile_of(&columns);
            let value = profile.to_value().unwrap();
            prop_assert_eq!(DataProfile::from_value(value).unwrap(), profile);
        }

        #[test]
        fn budget_view_never_exceeds_budget(rows in 1usize..80, budget in 1usize..40) {
            let values: Vec<String> = (0..rows).map(|i| i.to_string()).collect();
            let dataset = Dataset::from_pairs(vec![("n", values)]).unwrap();
            let profile = DataProfile::from_dataset(&dataset, &ColumnTypeClassifier::new());

            let view = profile.sampled_for_budget(budget);
            let expected = if rows > budget { Some(budget) } else { None };
            prop_assert_eq!(view.sampled_rows(), expected);
            prop_assert_eq!(view.row_count(), rows);
            prop_assert!(view.columns()[0].sample_values().len() <= budget);
        }
    }
}

// =============================================================================
// Validation Properties
// =============================================================================

mod validation_props {
    use super::*;

    proptest! {
        #[test]
        fn every_missing_reference_is_reported(
            refs in prop::collection::vec((0u8..4, any::<bool>(), 0usize..4), 0..16)
        ) {
            let known = ["Department", "Budget", "Actual", "Date"];
            let profile = profile_of(
                &known
                    .iter()
                    .map(|n| (n.to_string(), vec![RawValue::from("x")]))
                    .collect::<Vec<_>>(),
            );

            // Slot 0: KPI, 1: chart x axis, 2: chart series, 3: table column
            let mut spec = ReportSpec::new("Generated");
            let mut series_chart =
                ChartSpec::new(ChartType::Bar, "Series", AxisSpec::column("Date"));
            let mut table_columns = Vec::new();
            for (i, (slot, missing, n)) in refs.iter().enumerate() {
                let column = if *missing {
                    format!("Missing{}", n)
                } else {
                    known[*n].to_string()
                };
                match slot {
                    0 => spec
                        .kpis
                        .push(Kpi::new(format!("K{}", i), MetricKind::Sum).with_column(column)),
                    1 => spec.charts.push(ChartSpec::new(
                        ChartType::Line,
                        format!("C{}", i),
                        AxisSpec::column(column),
                    )),
                    2 => {
                        series_chart = series_chart.with_series(ChartSeries::new(
                            format!("S{}", i),
                            MetricKind::Sum,
                            column,
                        ))
                    }
                    _ => table_columns.push(column),
                }
            }
            spec.charts.push(series_chart);
            spec.tables.push(TableSpec::new("All", table_columns));

            let expected = refs.iter().filter(|(_, missing, _)| *missing).count();
            let violations = validate_spec(&spec, &profile);

            prop_assert_eq!(violations.len(), expected);
            prop_assert!(violations.iter().all(|v| v.column.starts_with("Missing")));
        }

        #[test]
        fn resolver_never_panics(
            target in "\\PC{0,20}",
            candidates in prop::collection::vec("\\PC{0,12}", 0..6)
        ) {
            let resolver = ColumnNameResolver::new(candidates.iter().map(String::as_str));
            if let Some(found) = resolver.resolve(&target) {
                prop_assert!(candidates.iter().any(|c| c == found.column));
            }
        }
    }
}

// =============================================================================
// Suggestion Properties
// =============================================================================

mod suggestion_props {
    use super::*;

    proptest! {
        #[test]
        fn matching_column_never_lowers_confidence(
            base in prop::collection::vec(
                (neutral_name(), prop::collection::vec(any_cell(), 3)),
                0..5,
            ),
            synonym in required_synonym(),
            values in prop::collection::vec(any_cell(), 3),
        ) {
            let suggester = ReportTypeSuggester::new();
            let before = profile_of(&base);

            let mut extended = base.clone();
            extended.push((format!("{}_total", synonym), values));
            let after = profile_of(&extended);

            for (id, pattern) in suggester.catalog().iter() {
                let old = suggester.score(pattern, &before);
                let new = suggester.score(pattern, &after);
                prop_assert!(new >= old, "{} dropped from {} to {}", id, old, new);
            }
        }
    }
}

// =============================================================================
// Parser Robustness
// =============================================================================

mod parser_props {
    use super::*;

    proptest! {
        #[test]
        fn parser_never_panics(data in "\\PC{0,200}") {
            let _ = Parser::new().parse_str(&data);
        }

        #[test]
        fn parsed_rows_match_metadata(
            rows in prop::collection::vec(("[a-z]{1,6}", 0u32..1000), 1..20)
        ) {
            let mut data = String::from("name,count\n");
            for (name, count) in &rows {
                data.push_str(&format!("{},{}\n", name, count));
            }

            let (dataset, meta) = Parser::new().parse_str(&data).unwrap();
            prop_assert_eq!(dataset.row_count(), rows.len());
            prop_assert_eq!(meta.row_count, rows.len());
            prop_assert_eq!(meta.column_count, 2);
        }
    }
}
