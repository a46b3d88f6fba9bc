//! Raw dataset representation and source metadata.

use std::borrow::Cow;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{GovReportError, Result};
use crate::sampling::head_tail;

/// Text values treated as missing, compared case-insensitively after trimming.
const NULL_MARKERS: &[&str] = &[
    "na", "n/a", "null", "none", "nil", "nan", "#n/a", "<na>", ".", "-",
];

/// Metadata about the source of a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path (`<memory>` for in-memory uploads).
    pub file: String,
    /// Full path to the file, when read from disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// SHA-256 hash of the raw contents.
    pub hash: String,
    /// Size of the raw contents in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the source was read.
    pub profiled_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for parsed contents.
    pub fn new(
        path: Option<PathBuf>,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "<memory>".to_string());

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            profiled_at: Utc::now(),
        }
    }

    /// Attach the on-disk location of the source.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if let Some(name) = path.file_name() {
            self.file = name.to_string_lossy().into_owned();
        }
        self.path = Some(path);
        self
    }

    /// Size of the source in megabytes.
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// A single raw cell as handed over by the parsing layer.
///
/// JSON input maps onto the variants directly: `null`, booleans, integers,
/// floats and strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawValue {
    /// Check if a text value represents a missing/null value.
    pub fn is_null_marker(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || NULL_MARKERS
                .iter()
                .any(|marker| trimmed.eq_ignore_ascii_case(marker))
    }

    /// Whether this cell counts as missing.
    pub fn is_null(&self) -> bool {
        match self {
            RawValue::Null => true,
            RawValue::Float(f) => f.is_nan(),
            RawValue::Text(s) => Self::is_null_marker(s),
            RawValue::Bool(_) | RawValue::Integer(_) => false,
        }
    }

    /// Whether the value arrived as a native boolean rather than text.
    pub fn is_native_bool(&self) -> bool {
        matches!(self, RawValue::Bool(_))
    }

    /// Stringified form of a non-null value.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        if self.is_null() {
            return None;
        }
        match self {
            RawValue::Text(s) => Some(Cow::Borrowed(s.as_str())),
            RawValue::Bool(b) => Some(Cow::Owned(b.to_string())),
            RawValue::Integer(i) => Some(Cow::Owned(i.to_string())),
            RawValue::Float(f) => Some(Cow::Owned(f.to_string())),
            RawValue::Null => None,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<Option<&str>> for RawValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(RawValue::Null, RawValue::from)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Integer(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

/// One named column of raw values.
#[derive(Debug, Clone, PartialEq)]
pub struct RawColumn {
    pub name: String,
    pub values: Vec<RawValue>,
}

impl RawColumn {
    pub fn new(name: impl Into<String>, values: Vec<RawValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Parsed tabular data as an ordered list of equally long named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<RawColumn>,
}

impl Dataset {
    /// Create a dataset, checking that every column has the same length.
    pub fn new(columns: Vec<RawColumn>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let expected = first.values.len();
            if let Some(bad) = columns.iter().find(|c| c.values.len() != expected) {
                return Err(GovReportError::RaggedColumns {
                    column: bad.name.clone(),
                    expected,
                    found: bad.values.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Build from (name, values) pairs.
    pub fn from_pairs<N, V, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, Vec<V>)>,
        N: Into<String>,
        V: Into<RawValue>,
    {
        let columns = pairs
            .into_iter()
            .map(|(name, values)| {
                RawColumn::new(name, values.into_iter().map(Into::into).collect())
            })
            .collect();
        Self::new(columns)
    }

    /// Build from a header row and row-major string records.
    ///
    /// Rows are expected to be rectangular; missing cells become nulls.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut columns: Vec<RawColumn> = headers
            .into_iter()
            .map(|h| RawColumn::new(h, Vec::with_capacity(rows.len())))
            .collect();

        for row in rows {
            let mut cells = row.into_iter();
            for column in columns.iter_mut() {
                let value = cells.next().map_or(RawValue::Null, RawValue::Text);
                column.values.push(value);
            }
        }

        Self { columns }
    }

    /// Parse a JSON object of `{"column": [values...]}`, keeping key order.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let map: IndexMap<String, Vec<RawValue>> = serde_json::from_str(json)?;
        Self::from_pairs(map)
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Columns in source order.
    pub fn columns(&self) -> &[RawColumn] {
        &self.columns
    }

    /// Column names in source order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&RawColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Reduce to at most `max_rows` rows: the first half of the budget from
    /// the top of the data and the second half from the bottom.
    pub fn head_tail(&self, max_rows: usize) -> Dataset {
        let columns = self
            .columns
            .iter()
            .map(|c| RawColumn::new(c.name.clone(), head_tail(&c.values, max_rows)))
            .collect();
        Dataset { columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_markers() {
        assert!(RawValue::is_null_marker(""));
        assert!(RawValue::is_null_marker("  "));
        assert!(RawValue::is_null_marker("NA"));
        assert!(RawValue::is_null_marker("n/a"));
        assert!(RawValue::is_null_marker("NaN"));
        assert!(RawValue::is_null_marker("#N/A"));
        assert!(!RawValue::is_null_marker("0"));
        assert!(!RawValue::is_null_marker("Finance"));
        assert!(RawValue::Float(f64::NAN).is_null());
        assert!(!RawValue::Integer(0).is_null());
    }

    #[test]
    fn test_as_text() {
        assert_eq!(RawValue::Integer(42).as_text().as_deref(), Some("42"));
        assert_eq!(RawValue::Float(1.5).as_text().as_deref(), Some("1.5"));
        assert_eq!(RawValue::Bool(true).as_text().as_deref(), Some("true"));
        assert_eq!(RawValue::from("null").as_text(), None);
        assert_eq!(RawValue::Null.as_text(), None);
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let err = Dataset::from_pairs(vec![("a", vec!["1", "2"]), ("b", vec!["1"])]).unwrap_err();
        assert!(matches!(err, GovReportError::RaggedColumns { found: 1, .. }));
    }

    #[test]
    fn test_from_rows_pads_missing_cells() {
        let ds = Dataset::from_rows(
            vec!["a".into(), "b".into()],
            vec![vec!["1".into(), "2".into()], vec!["3".into()]],
        );
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.columns()[1].values[1], RawValue::Null);
    }

    #[test]
    fn test_from_json_preserves_order() {
        let ds = Dataset::from_json_str(r#"{"z": [1, null], "a": ["x", true]}"#).unwrap();
        let headers: Vec<&str> = ds.headers().collect();
        assert_eq!(headers, vec!["z", "a"]);
        assert_eq!(ds.columns()[0].values, vec![RawValue::Integer(1), RawValue::Null]);
        assert_eq!(ds.columns()[1].values[1], RawValue::Bool(true));
    }

    #[test]
    fn test_head_tail() {
        let values: Vec<String> = (0..10).map(|i| i.to_string()).collect();
        let ds = Dataset::from_pairs(vec![("n", values)]).unwrap();
        let reduced = ds.head_tail(4);
        let kept: Vec<String> = reduced.columns()[0]
            .values
            .iter()
            .filter_map(|v| v.as_text().map(|s| s.into_owned()))
            .collect();
        assert_eq!(kept, vec!["0", "1", "8", "9"]);
        assert_eq!(ds.head_tail(20), ds);
    }
}
