//! Processing limits and strategies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{GovReportError, Result};

const ROW_COUNT_WARNING: usize = 10_000;
const FILE_SIZE_WARNING_MB: f64 = 50.0;
const TOKEN_WARNING: usize = 10_000;

/// Deployment environment selecting a preset of limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl FromStr for Environment {
    type Err = GovReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            "testing" | "test" => Ok(Environment::Testing),
            other => Err(GovReportError::Config(format!("unknown environment '{}'", other))),
        }
    }
}

/// How a dataset of a given size is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStrategy {
    /// Up to 5,000 rows.
    Standard,
    /// 5,001 to 10,000 rows.
    Sampled,
    /// More than 10,000 rows.
    Chunked,
}

impl ProcessingStrategy {
    pub fn for_rows(row_count: usize) -> Self {
        if row_count <= 5_000 {
            ProcessingStrategy::Standard
        } else if row_count <= 10_000 {
            ProcessingStrategy::Sampled
        } else {
            ProcessingStrategy::Chunked
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ProcessingStrategy::Standard => "Standard processing for datasets under 5000 rows",
            ProcessingStrategy::Sampled => "Sampled processing for datasets 5000-10000 rows",
            ProcessingStrategy::Chunked => "Chunked processing for datasets over 10000 rows",
        }
    }
}

impl fmt::Display for ProcessingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessingStrategy::Standard => "standard",
            ProcessingStrategy::Sampled => "sampled",
            ProcessingStrategy::Chunked => "chunked",
        };
        f.write_str(name)
    }
}

/// Warnings about expensive inputs and how to reduce the cost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostWarning {
    pub has_warnings: bool,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Limits applied while reading and profiling data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Upper bound on rows handed to downstream consumers.
    pub max_sample_rows: usize,
    /// Token budget for a serialized profile.
    pub max_ai_tokens: usize,
    /// Largest accepted input file.
    pub max_file_size_mb: f64,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_sample_rows: 1000,
            max_ai_tokens: 15_000,
            max_file_size_mb: 100.0,
        }
    }
}

impl ProcessingConfig {
    /// Preset limits for an environment.
    pub fn for_environment(env: Environment) -> Self {
        let (max_sample_rows, max_ai_tokens) = match env {
            Environment::Development => (500, 10_000),
            Environment::Production => (1000, 15_000),
            Environment::Testing => (100, 5_000),
        };
        Self {
            max_sample_rows,
            max_ai_tokens,
            ..Self::default()
        }
    }

    /// Load from `GOVREPORT_ENV`, `MAX_SAMPLE_ROWS`, `MAX_AI_TOKENS` and
    /// `MAX_FILE_SIZE_MB`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable source.
    ///
    /// The environment preset is applied first; explicit limits override it.
    /// An unknown environment name falls back to development.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env = match lookup("GOVREPORT_ENV") {
            Some(name) => name.parse().unwrap_or_else(|e| {
                warn!("{}; using development limits", e);
                Environment::Development
            }),
            None => Environment::Development,
        };

        let mut config = Self::for_environment(env);
        if let Some(v) = lookup("MAX_SAMPLE_ROWS") {
            config.max_sample_rows = parse_var("MAX_SAMPLE_ROWS", &v)?;
        }
        if let Some(v) = lookup("MAX_AI_TOKENS") {
            config.max_ai_tokens = parse_var("MAX_AI_TOKENS", &v)?;
        }
        if let Some(v) = lookup("MAX_FILE_SIZE_MB") {
            let mb: f64 = parse_var("MAX_FILE_SIZE_MB", &v)?;
            if !mb.is_finite() || mb <= 0.0 {
                return Err(GovReportError::Config(format!(
                    "MAX_FILE_SIZE_MB must be positive, got '{}'",
                    v
                )));
            }
            config.max_file_size_mb = mb;
        }
        Ok(config)
    }

    pub fn with_max_sample_rows(mut self, rows: usize) -> Self {
        self.max_sample_rows = rows;
        self
    }

    pub fn with_max_ai_tokens(mut self, tokens: usize) -> Self {
        self.max_ai_tokens = tokens;
        self
    }

    pub fn with_max_file_size_mb(mut self, mb: f64) -> Self {
        self.max_file_size_mb = mb;
        self
    }

    /// Fail when an input exceeds the size limit.
    pub fn check_file_size(&self, size_mb: f64) -> Result<()> {
        if size_mb > self.max_file_size_mb {
            return Err(GovReportError::FileTooLarge {
                size_mb,
                limit_mb: self.max_file_size_mb,
            });
        }
        Ok(())
    }

    /// Rows to sample for downstream planning, by dataset size.
    pub fn ai_sample_size(&self, row_count: usize) -> usize {
        if row_count <= 5_000 {
            500
        } else if row_count <= 10_000 {
            750
        } else if row_count <= 50_000 {
            1000
        } else {
            200
        }
    }

    /// Row budget actually applied: the size-based sample capped by
    /// `max_sample_rows`.
    pub fn row_budget(&self, row_count: usize) -> usize {
        self.ai_sample_size(row_count).min(self.max_sample_rows)
    }

    /// Chunk size for chunked processing.
    pub fn chunk_size(&self, row_count: usize) -> usize {
        if row_count <= 10_000 {
            1000
        } else if row_count <= 50_000 {
            5000
        } else {
            10_000
        }
    }

    pub fn processing_strategy(&self, row_count: usize) -> ProcessingStrategy {
        ProcessingStrategy::for_rows(row_count)
    }

    /// Warnings and cost-saving advice for a dataset.
    pub fn cost_warning(
        &self,
        row_count: usize,
        file_size_mb: f64,
        estimated_tokens: usize,
    ) -> CostWarning {
        let mut warnings = Vec::new();
        let mut recommendations = Vec::new();

        if row_count > ROW_COUNT_WARNING {
            warnings.push(format!(
                "Large dataset detected ({} rows). \
                 Consider using a smaller sample for initial planning.",
                group_thousands(row_count)
            ));
            recommendations.extend([
                "Use AI-optimized sampling for planning (reduces tokens by 80%)".to_string(),
                "Process data in chunks for better performance".to_string(),
            ]);
        }

        if file_size_mb > FILE_SIZE_WARNING_MB {
            warnings.push(format!(
                "Large file size ({:.1} MB). Processing may take longer.",
                file_size_mb
            ));
        }

        if estimated_tokens > TOKEN_WARNING {
            warnings.push(format!(
                "High token usage estimated ({} tokens). \
                 Using aggressive sampling to reduce costs.",
                group_thousands(estimated_tokens)
            ));
            recommendations.extend([
                "Consider breaking large reports into smaller sections".to_string(),
                "Use template-based planning for cost-sensitive operations".to_string(),
            ]);
        }

        if file_size_mb > FILE_SIZE_WARNING_MB {
            recommendations.extend([
                "Large files may take longer to process".to_string(),
                "Consider compressing data or using more efficient formats".to_string(),
            ]);
        }

        CostWarning {
            has_warnings: !warnings.is_empty(),
            warnings,
            recommendations,
        }
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| GovReportError::Config(format!("{} has invalid value '{}'", key, value)))
}

/// Format an integer with comma thousands separators.
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ProcessingConfig::default();
        assert_eq!(config.max_sample_rows, 1000);
        assert_eq!(config.max_ai_tokens, 15_000);
        assert_eq!(config.max_file_size_mb, 100.0);
    }

    #[test]
    fn test_environment_presets() {
        let config =
            ProcessingConfig::from_lookup(lookup(&[("GOVREPORT_ENV", "testing")])).unwrap();
        assert_eq!(config.max_sample_rows, 100);
        assert_eq!(config.max_ai_tokens, 5_000);

        let config = ProcessingConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.max_sample_rows, 500);
    }

    #[test]
    fn test_overrides_and_errors() {
        let config = ProcessingConfig::from_lookup(lookup(&[
            ("GOVREPORT_ENV", "production"),
            ("MAX_SAMPLE_ROWS", "250"),
            ("MAX_FILE_SIZE_MB", "12.5"),
        ]))
        .unwrap();
        assert_eq!(config.max_sample_rows, 250);
        assert_eq!(config.max_ai_tokens, 15_000);
        assert_eq!(config.max_file_size_mb, 12.5);

        let err = ProcessingConfig::from_lookup(lookup(&[("MAX_AI_TOKENS", "lots")])).unwrap_err();
        assert!(matches!(err, GovReportError::Config(_)));
        assert!(ProcessingConfig::from_lookup(lookup(&[("MAX_FILE_SIZE_MB", "-1")])).is_err());
    }

    #[test]
    fn test_unknown_environment_falls_back() {
        let config =
            ProcessingConfig::from_lookup(lookup(&[("GOVREPORT_ENV", "staging")])).unwrap();
        assert_eq!(config, ProcessingConfig::for_environment(Environment::Development));
    }

    #[test]
    fn test_size_tiers() {
        let config = ProcessingConfig::default();
        assert_eq!(config.ai_sample_size(5_000), 500);
        assert_eq!(config.ai_sample_size(5_001), 750);
        assert_eq!(config.ai_sample_size(50_000), 1000);
        assert_eq!(config.ai_sample_size(50_001), 200);
        assert_eq!(config.chunk_size(10_000), 1000);
        assert_eq!(config.chunk_size(20_000), 5000);
        assert_eq!(config.chunk_size(60_000), 10_000);
        assert_eq!(config.processing_strategy(100), ProcessingStrategy::Standard);
        assert_eq!(config.processing_strategy(7_000), ProcessingStrategy::Sampled);
        assert_eq!(config.processing_strategy(10_001), ProcessingStrategy::Chunked);
        assert_eq!(config.with_max_sample_rows(300).row_budget(20_000), 300);
    }

    #[test]
    fn test_file_size_limit() {
        let config = ProcessingConfig::default().with_max_file_size_mb(1.0);
        assert!(config.check_file_size(0.5).is_ok());
        assert!(matches!(
            config.check_file_size(2.0),
            Err(GovReportError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_cost_warning() {
        let config = ProcessingConfig::default();
        let quiet = config.cost_warning(100, 1.0, 500);
        assert!(!quiet.has_warnings);
        assert!(quiet.recommendations.is_empty());

        let loud = config.cost_warning(25_000, 60.0, 12_000);
        assert!(loud.has_warnings);
        assert_eq!(loud.warnings.len(), 3);
        assert!(loud.warnings[0].contains("25,000 rows"));
        assert_eq!(loud.recommendations.len(), 6);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
