//! Column profile definition and statistics.

use serde::{Deserialize, Serialize};

use super::types::ColumnType;
use crate::inference::ColumnTypeClassifier;
use crate::input::RawValue;

/// Statistics computed for a column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    /// Total number of values (including nulls).
    pub total_count: usize,
    /// Number of null/missing values.
    pub null_count: usize,
    /// Number of distinct non-null values.
    pub unique_count: usize,
    /// Smallest parseable value (number columns only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Largest parseable value (number columns only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Mean of the parseable values (number columns only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
}

impl ColumnStats {
    /// Number of non-null values.
    pub fn non_null_count(&self) -> usize {
        self.total_count.saturating_sub(self.null_count)
    }

    /// Fraction of non-null values, 0.0 for an empty column.
    pub fn completeness(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            self.non_null_count() as f64 / self.total_count as f64
        }
    }

    /// Whether min/max/mean are present.
    pub fn has_numeric(&self) -> bool {
        self.min.is_some() && self.max.is_some() && self.mean.is_some()
    }
}

/// Profile of a single column.
///
/// The type is decided once at construction; there are no setters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    name: String,
    #[serde(rename = "type")]
    column_type: ColumnType,
    #[serde(default, alias = "sampleValues")]
    sample_values: Vec<String>,
    #[serde(default)]
    stats: ColumnStats,
}

impl ColumnProfile {
    /// Profile raw values with the default classifier.
    pub fn from_values(name: impl Into<String>, values: &[RawValue]) -> Self {
        ColumnTypeClassifier::new().profile_column(name, values)
    }

    /// Reassemble a profile from already-computed parts.
    pub fn from_parts(
        name: impl Into<String>,
        column_type: ColumnType,
        sample_values: Vec<String>,
        stats: ColumnStats,
    ) -> Self {
        Self {
            name: name.into(),
            column_type,
            sample_values,
            stats,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// Representative values in encounter order.
    pub fn sample_values(&self) -> &[String] {
        &self.sample_values
    }

    pub fn stats(&self) -> &ColumnStats {
        &self.stats
    }

    /// Copy of this profile with a different sample, stats untouched.
    pub(crate) fn with_samples(&self, sample_values: Vec<String>) -> Self {
        Self {
            sample_values,
            ..self.clone()
        }
    }
}
