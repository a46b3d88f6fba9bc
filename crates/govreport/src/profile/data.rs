//! Dataset-level profile.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::column::ColumnProfile;
use super::types::ColumnType;
use crate::error::{GovReportError, Result};
use crate::inference::ColumnTypeClassifier;
use crate::input::Dataset;
use crate::sampling::head_tail;

/// Profile of an entire dataset: one [`ColumnProfile`] per source column,
/// in source order, plus dataset-level counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DataProfileRepr")]
pub struct DataProfile {
    columns: Vec<ColumnProfile>,
    row_count: usize,
    column_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    processing_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sampled_rows: Option<usize>,
}

/// Input shape of the dictionary form; counts fall back to the columns.
#[derive(Deserialize)]
struct DataProfileRepr {
    columns: Vec<ColumnProfile>,
    #[serde(default, alias = "total_rows")]
    row_count: Option<usize>,
    #[serde(default)]
    column_count: Option<usize>,
    #[serde(default)]
    size_bytes: Option<u64>,
    #[serde(default)]
    processing_time_ms: Option<u64>,
    #[serde(default)]
    sampled_rows: Option<usize>,
}

impl From<DataProfileRepr> for DataProfile {
    fn from(repr: DataProfileRepr) -> Self {
        let row_count = repr
            .row_count
            .unwrap_or_else(|| first_column_total(&repr.columns));
        let column_count = repr.column_count.unwrap_or(repr.columns.len());
        Self {
            columns: repr.columns,
            row_count,
            column_count,
            size_bytes: repr.size_bytes,
            processing_time_ms: repr.processing_time_ms,
            sampled_rows: repr.sampled_rows,
        }
    }
}

fn first_column_total(columns: &[ColumnProfile]) -> usize {
    columns.first().map_or(0, |c| c.stats().total_count)
}

impl DataProfile {
    /// Assemble a profile from already-built column profiles.
    pub fn new(columns: Vec<ColumnProfile>) -> Self {
        Self {
            row_count: first_column_total(&columns),
            column_count: columns.len(),
            columns,
            size_bytes: None,
            processing_time_ms: None,
            sampled_rows: None,
        }
    }

    /// Profile every column of a dataset independently.
    pub fn from_dataset(dataset: &Dataset, classifier: &ColumnTypeClassifier) -> Self {
        let columns: Vec<ColumnProfile> = dataset
            .columns()
            .iter()
            .map(|c| classifier.profile_column(c.name.clone(), &c.values))
            .collect();

        let profile = Self::new(columns);
        info!(
            rows = profile.row_count,
            columns = profile.column_count,
            "profiled dataset"
        );
        profile
    }

    /// Rebuild a profile from its dictionary form.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| GovReportError::MalformedProfile(e.to_string()))
    }

    /// Rebuild a profile from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| GovReportError::MalformedProfile(e.to_string()))
    }

    /// Dictionary form of the profile.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn with_size_bytes(mut self, size_bytes: u64) -> Self {
        self.size_bytes = Some(size_bytes);
        self
    }

    pub fn with_processing_time_ms(mut self, ms: u64) -> Self {
        self.processing_time_ms = Some(ms);
        self
    }

    pub fn columns(&self) -> &[ColumnProfile] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn size_bytes(&self) -> Option<u64> {
        self.size_bytes
    }

    pub fn processing_time_ms(&self) -> Option<u64> {
        self.processing_time_ms
    }

    /// Row budget this view was reduced to, if any.
    pub fn sampled_rows(&self) -> Option<usize> {
        self.sampled_rows
    }

    /// Look up a column by exact name.
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Columns of the given type, in source order.
    pub fn columns_of_type(&self, column_type: ColumnType) -> Vec<&ColumnProfile> {
        self.columns
            .iter()
            .filter(|c| c.column_type() == column_type)
            .collect()
    }

    /// Columns of any quantitative type (number, currency, percent).
    pub fn quantitative_columns(&self) -> Vec<&ColumnProfile> {
        self.columns
            .iter()
            .filter(|c| c.column_type().is_quantitative())
            .collect()
    }

    /// Column names in source order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    /// View for consumers with a row budget.
    ///
    /// When the dataset is larger than `max_rows`, each column's samples are
    /// cut to a head+tail split of the budget. Stats and counts always
    /// describe the full dataset.
    pub fn sampled_for_budget(&self, max_rows: usize) -> DataProfile {
        if self.row_count <= max_rows {
            return self.clone();
        }

        let columns = self
            .columns
            .iter()
            .map(|c| c.with_samples(head_tail(c.sample_values(), max_rows)))
            .collect();

        DataProfile {
            columns,
            sampled_rows: Some(max_rows),
            ..self.clone()
        }
    }

    /// Rough token count of the serialized profile (four characters per token).
    pub fn estimated_tokens(&self) -> usize {
        serde_json::to_string(self).map_or(0, |s| s.len() / 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Dataset;
    use crate::profile::ColumnStats;
    use serde_json::json;

    fn budget_dataset() -> Dataset {
        Dataset::from_pairs(vec![
            ("Department", vec!["Finance", "Health", "Parks"]),
            ("Budget", vec!["$1,000", "$2,000", "$3,000"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_dataset_counts() {
        let profile = DataProfile::from_dataset(&budget_dataset(), &ColumnTypeClassifier::new());
        assert_eq!(profile.row_count(), 3);
        assert_eq!(profile.column_count(), 2);
        assert_eq!(profile.column_names(), vec!["Department", "Budget"]);
    }

    #[test]
    fn test_lookup_and_filter() {
        let profile = DataProfile::from_dataset(&budget_dataset(), &ColumnTypeClassifier::new());
        assert!(profile.column("Budget").is_some());
        assert!(profile.column("budget").is_none());
        let currency = profile.columns_of_type(ColumnType::Currency);
        assert_eq!(currency.len(), 1);
        assert_eq!(currency[0].name(), "Budget");
        assert!(profile.columns_of_type(ColumnType::Date).is_empty());
    }

    #[test]
    fn test_empty_profile() {
        let profile = DataProfile::new(vec![]);
        assert_eq!(profile.row_count(), 0);
        assert_eq!(profile.column_count(), 0);
    }

    #[test]
    fn test_dictionary_round_trip() {
        let profile = DataProfile::from_dataset(&budget_dataset(), &ColumnTypeClassifier::new())
            .with_size_bytes(120);
        let value = profile.to_value().unwrap();
        assert_eq!(value["columns"][1]["type"], "currency");
        assert_eq!(value["size_bytes"], 120);
        assert!(value.get("sampled_rows").is_none());

        let rebuilt = DataProfile::from_value(value).unwrap();
        assert_eq!(rebuilt, profile);
    }

    #[test]
    fn test_input_aliases() {
        let value = json!({
            "columns": [
                {"name": "Amount", "type": "number", "sampleValues": ["1", "2"],
                 "stats": {"total_count": 2, "null_count": 0, "unique_count": 2}}
            ],
            "total_rows": 2
        });
        let profile = DataProfile::from_value(value).unwrap();
        assert_eq!(profile.row_count(), 2);
        assert_eq!(profile.column_count(), 1);
        assert_eq!(profile.columns()[0].sample_values(), &["1", "2"]);
    }

    #[test]
    fn test_malformed_profile() {
        let err = DataProfile::from_value(json!({"rows": 3})).unwrap_err();
        assert!(matches!(err, GovReportError::MalformedProfile(_)));
    }

    #[test]
    fn test_budget_sampling() {
        let stats = ColumnStats {
            total_count: 100,
            ..ColumnStats::default()
        };
        let samples: Vec<String> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let profile = DataProfile::new(vec![ColumnProfile::from_parts(
            "letters",
            ColumnType::String,
            samples,
            stats.clone(),
        )]);

        let reduced = profile.sampled_for_budget(4);
        assert_eq!(reduced.sampled_rows(), Some(4));
        assert_eq!(reduced.row_count(), 100);
        assert_eq!(reduced.columns()[0].sample_values(), &["a", "b", "d", "e"]);
        assert_eq!(reduced.columns()[0].stats(), &stats);

        let unchanged = profile.sampled_for_budget(500);
        assert_eq!(unchanged, profile);
    }

    #[test]
    fn test_estimated_tokens() {
        let profile = DataProfile::from_dataset(&budget_dataset(), &ColumnTypeClassifier::new());
        let len = serde_json::to_string(&profile).unwrap().len();
        assert_eq!(profile.estimated_tokens(), len / 4);
        assert!(profile.estimated_tokens() > 0);
    }
}
