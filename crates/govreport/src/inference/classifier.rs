//! Column type classification from raw sample values.

use std::borrow::Cow;
use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::input::RawValue;
use crate::profile::{ColumnProfile, ColumnStats, ColumnType};

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap(),       // YYYY-MM-DD
        Regex::new(r"^\d{2}/\d{2}/\d{4}").unwrap(),       // MM/DD/YYYY
        Regex::new(r"^\d{2}-\d{2}-\d{4}").unwrap(),       // MM-DD-YYYY
        Regex::new(r"^\d{1,2}/\d{1,2}/\d{2,4}").unwrap(), // M/D/YY(YY)
    ]
});

static PERCENT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+\.?\d*%$").unwrap());

static CURRENCY_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\$[\d,]+\.?\d*$").unwrap());

// =============================================================================
// RUNNING STATISTICS
// =============================================================================

/// Single-pass min/max/mean accumulator.
#[derive(Debug, Clone)]
struct RunningStats {
    count: usize,
    mean: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn add(&mut self, value: f64) {
        self.count += 1;
        // Scale before subtracting so opposite-sign extremes cannot overflow
        let n = self.count as f64;
        self.mean += value / n - self.mean / n;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// (min, max, mean), or None when nothing was added.
    fn finish(&self) -> Option<(f64, f64, f64)> {
        if self.count == 0 {
            return None;
        }
        let mean = if self.mean.is_finite() {
            self.mean
        } else {
            self.min / 2.0 + self.max / 2.0
        };
        // Rounding in the incremental mean can drift a ulp past the bounds
        Some((self.min, self.max, mean.clamp(self.min, self.max)))
    }
}

// =============================================================================
// CLASSIFIER
// =============================================================================

/// Classifier tuning knobs.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Number of leading non-null values examined by each check.
    pub sample_size: usize,
    /// Minimum fraction of examined values that must match a check.
    pub match_threshold: f64,
    /// Fraction of letter-bearing values above which a column is not numeric.
    pub text_threshold: f64,
    /// Number of sample values kept on the profile.
    pub max_sample_values: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            sample_size: 20,
            match_threshold: 0.7,
            text_threshold: 0.3,
            max_sample_values: 5,
        }
    }
}

/// Infers the semantic type of a column.
///
/// Checks run in priority order (date, percent, currency, number, boolean)
/// and the first one that matches wins. A column with no non-null values,
/// or one that matches nothing, is a string column.
#[derive(Debug, Clone, Default)]
pub struct ColumnTypeClassifier {
    config: ClassifierConfig,
}

impl ColumnTypeClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Build the full profile of one column.
    pub fn profile_column(&self, name: impl Into<String>, values: &[RawValue]) -> ColumnProfile {
        let name = name.into();
        let non_null: Vec<&RawValue> = values.iter().filter(|v| !v.is_null()).collect();

        let column_type = self.infer_type(&non_null);
        let stats = self.compute_stats(values, &non_null, column_type);
        let sample_values = non_null
            .iter()
            .take(self.config.max_sample_values)
            .filter_map(|v| v.as_text().map(Cow::into_owned))
            .collect();

        debug!(
            column = %name,
            column_type = %column_type,
            nulls = stats.null_count,
            unique = stats.unique_count,
            "classified column"
        );

        ColumnProfile::from_parts(name, column_type, sample_values, stats)
    }

    /// Classify a column from all of its raw values, nulls included.
    pub fn classify(&self, values: &[RawValue]) -> ColumnType {
        let non_null: Vec<&RawValue> = values.iter().filter(|v| !v.is_null()).collect();
        self.infer_type(&non_null)
    }

    fn infer_type(&self, non_null: &[&RawValue]) -> ColumnType {
        let window = &non_null[..non_null.len().min(self.config.sample_size)];
        if window.is_empty() {
            return ColumnType::String;
        }

        let texts: Vec<String> = window
            .iter()
            .filter_map(|v| v.as_text())
            .map(|s| s.trim().to_string())
            .collect();

        if self.matches(&texts, is_date) {
            ColumnType::Date
        } else if self.matches(&texts, |s| PERCENT_PATTERN.is_match(s)) {
            ColumnType::Percent
        } else if self.matches(&texts, |s| CURRENCY_PATTERN.is_match(s)) {
            ColumnType::Currency
        } else if self.is_numeric(&texts) {
            ColumnType::Number
        } else if self.ratio(window.iter().filter(|v| v.is_native_bool()).count(), window.len())
            >= self.config.match_threshold
        {
            ColumnType::Boolean
        } else {
            ColumnType::String
        }
    }

    fn matches(&self, texts: &[String], pred: impl Fn(&str) -> bool) -> bool {
        let hits = texts.iter().filter(|s| pred(s)).count();
        self.ratio(hits, texts.len()) >= self.config.match_threshold
    }

    fn is_numeric(&self, texts: &[String]) -> bool {
        let text_like = texts
            .iter()
            .filter(|s| s.chars().any(|c| c.is_ascii_alphabetic()))
            .count();
        if self.ratio(text_like, texts.len()) > self.config.text_threshold {
            return false;
        }

        let numeric = texts
            .iter()
            .filter(|s| !s.chars().any(|c| c.is_ascii_alphabetic()))
            .filter(|s| {
                let cleaned: String = s.chars().filter(|c| !matches!(c, ',' | '$' | '%')).collect();
                cleaned.parse::<f64>().is_ok()
            })
            .count();
        self.ratio(numeric, texts.len()) >= self.config.match_threshold
    }

    fn ratio(&self, hits: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    fn compute_stats(
        &self,
        values: &[RawValue],
        non_null: &[&RawValue],
        column_type: ColumnType,
    ) -> ColumnStats {
        let texts: Vec<Cow<'_, str>> = non_null.iter().filter_map(|v| v.as_text()).collect();
        let unique: HashSet<&str> = texts.iter().map(|s| s.as_ref()).collect();

        let mut stats = ColumnStats {
            total_count: values.len(),
            null_count: values.len() - non_null.len(),
            unique_count: unique.len(),
            ..ColumnStats::default()
        };

        if column_type == ColumnType::Number {
            let mut running = RunningStats::new();
            for text in &texts {
                if let Ok(n) = text.trim().replace(',', "").parse::<f64>() {
                    if n.is_finite() {
                        running.add(n);
                    }
                }
            }
            if let Some((min, max, mean)) = running.finish() {
                stats.min = Some(min);
                stats.max = Some(max);
                stats.mean = Some(mean);
            }
        }

        stats
    }
}

fn is_date(value: &str) -> bool {
    DATE_PATTERNS.iter().any(|p| p.is_match(value))
}
