//! Main profiler and public API.

use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{CostWarning, ProcessingConfig, ProcessingStrategy};
use crate::error::{GovReportError, Result};
use crate::inference::{ClassifierConfig, ColumnTypeClassifier};
use crate::input::{Dataset, Parser, ParserConfig, SourceMetadata};
use crate::profile::DataProfile;

/// Configuration for profiling.
#[derive(Debug, Clone, Default)]
pub struct ProfilerConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Classifier configuration.
    pub classifier: ClassifierConfig,
    /// Processing limits.
    pub processing: ProcessingConfig,
}

/// Result of profiling a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileReport {
    /// Metadata about the source.
    pub source: SourceMetadata,
    /// Profile of the full dataset.
    pub profile: DataProfile,
    /// Strategy chosen for the dataset size.
    pub strategy: ProcessingStrategy,
    /// Row budget for downstream consumers.
    pub ai_sample_size: usize,
    /// Cost warnings for the dataset.
    pub cost: CostWarning,
}

impl ProfileReport {
    /// The profile reduced to the row budget.
    pub fn budget_view(&self) -> DataProfile {
        self.profile.sampled_for_budget(self.ai_sample_size)
    }
}

/// Reads, classifies and profiles tabular data.
pub struct Profiler {
    config: ProfilerConfig,
    parser: Parser,
    classifier: ColumnTypeClassifier,
}

impl Profiler {
    /// Create a profiler with default configuration.
    pub fn new() -> Self {
        Self::with_config(ProfilerConfig::default())
    }

    /// Create a profiler with custom configuration.
    pub fn with_config(config: ProfilerConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        let classifier = ColumnTypeClassifier::with_config(config.classifier.clone());
        Self {
            config,
            parser,
            classifier,
        }
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Profile a CSV/TSV file.
    pub fn profile_file(&self, path: impl AsRef<Path>) -> Result<ProfileReport> {
        let path = path.as_ref();
        let size = std::fs::metadata(path)
            .map_err(|e| GovReportError::Io {
                path: path.to_path_buf(),
                source: e,
            })?
            .len();
        self.config
            .processing
            .check_file_size(size as f64 / (1024.0 * 1024.0))?;

        let start = Instant::now();
        let (dataset, source) = self.parser.parse_file(path)?;
        Ok(self.finish(&dataset, source, start))
    }

    /// Profile in-memory delimited text.
    pub fn profile_str(&self, data: &str) -> Result<ProfileReport> {
        self.config
            .processing
            .check_file_size(data.len() as f64 / (1024.0 * 1024.0))?;

        let start = Instant::now();
        let (dataset, source) = self.parser.parse_str(data)?;
        Ok(self.finish(&dataset, source, start))
    }

    /// Profile an already-parsed dataset.
    pub fn profile_dataset(&self, dataset: &Dataset) -> Result<ProfileReport> {
        if dataset.column_count() == 0 {
            return Err(GovReportError::EmptyData("dataset has no columns".to_string()));
        }

        let start = Instant::now();
        let source = SourceMetadata::new(
            None,
            String::new(),
            0,
            "dataset".to_string(),
            dataset.row_count(),
            dataset.column_count(),
        );
        Ok(self.finish(dataset, source, start))
    }

    fn finish(&self, dataset: &Dataset, source: SourceMetadata, start: Instant) -> ProfileReport {
        let processing = &self.config.processing;
        let rows = dataset.row_count();

        let profile = DataProfile::from_dataset(dataset, &self.classifier)
            .with_size_bytes(source.size_bytes)
            .with_processing_time_ms(start.elapsed().as_millis() as u64);

        let ai_sample_size = processing.row_budget(rows);
        let tokens = profile.sampled_for_budget(ai_sample_size).estimated_tokens();
        let cost = processing.cost_warning(rows, source.size_mb(), tokens);
        let strategy = processing.processing_strategy(rows);

        info!(
            file = %source.file,
            rows,
            columns = profile.column_count(),
            strategy = %strategy,
            "profiled source"
        );

        ProfileReport {
            source,
            profile,
            strategy,
            ai_sample_size,
            cost,
        }
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ColumnType;

    const BUDGET_CSV: &str = "Department,Budget,Actual\n\
        Finance,\"$1,200\",\"$1,100\"\n\
        Health,\"$800\",\"$950\"\n";

    #[test]
    fn test_profile_str() {
        let report = Profiler::new().profile_str(BUDGET_CSV).unwrap();
        assert_eq!(report.profile.row_count(), 2);
        assert_eq!(report.profile.columns()[1].column_type(), ColumnType::Currency);
        assert_eq!(report.profile.size_bytes(), Some(BUDGET_CSV.len() as u64));
        assert!(report.profile.processing_time_ms().is_some());
        assert_eq!(report.strategy, ProcessingStrategy::Standard);
        assert!(!report.cost.has_warnings);
    }

    #[test]
    fn test_row_budget_from_config() {
        let config = ProfilerConfig {
            processing: ProcessingConfig::default().with_max_sample_rows(1),
            ..ProfilerConfig::default()
        };
        let report = Profiler::with_config(config).profile_str(BUDGET_CSV).unwrap();
        assert_eq!(report.ai_sample_size, 1);

        let view = report.budget_view();
        assert_eq!(view.sampled_rows(), Some(1));
        assert_eq!(view.columns()[0].sample_values(), &["Finance"]);
    }

    #[test]
    fn test_size_limit() {
        let config = ProfilerConfig {
            processing: ProcessingConfig::default().with_max_file_size_mb(0.000001),
            ..ProfilerConfig::default()
        };
        let err = Profiler::with_config(config).profile_str(BUDGET_CSV).unwrap_err();
        assert!(matches!(err, GovReportError::FileTooLarge { .. }));
    }

    #[test]
    fn test_profile_dataset() {
        let dataset = Dataset::from_pairs(vec![("n", vec!["1", "2", "3"])]).unwrap();
        let report = Profiler::new().profile_dataset(&dataset).unwrap();
        assert_eq!(report.source.format, "dataset");
        assert_eq!(report.profile.columns()[0].column_type(), ColumnType::Number);

        assert!(Profiler::new().profile_dataset(&Dataset::default()).is_err());
    }
}
