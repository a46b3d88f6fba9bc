//! Scoring of data profiles against the report-type catalog.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::catalog::{PatternCatalog, ReportPattern, TypeRequirement};
use crate::error::Result;
use crate::profile::{ColumnType, DataProfile};

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

const REQUIRED_WEIGHT: f64 = 0.6;
const OPTIONAL_WEIGHT: f64 = 0.3;
const TYPE_WEIGHT: f64 = 0.1;

/// Score given to a name that only shares words with a synonym.
const SIMILAR_SCORE: f64 = 0.8;
const SIMILARITY_THRESHOLD: f64 = 0.5;

const MAX_INSIGHTS: usize = 3;
const MAX_QUESTIONS: usize = 3;
const MAX_RECOMMENDATIONS: usize = 5;

/// Human-readable band of a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    #[serde(rename = "Weak Match")]
    Weak,
    #[serde(rename = "Fair Match")]
    Fair,
    #[serde(rename = "Good Match")]
    Good,
    #[serde(rename = "Very Good Match")]
    VeryGood,
    #[serde(rename = "Excellent Match")]
    Excellent,
}

impl ConfidenceLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            ConfidenceLevel::Excellent
        } else if score >= 0.8 {
            ConfidenceLevel::VeryGood
        } else if score >= 0.7 {
            ConfidenceLevel::Good
        } else if score >= 0.6 {
            ConfidenceLevel::Fair
        } else {
            ConfidenceLevel::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLevel::Excellent => "Excellent Match",
            ConfidenceLevel::VeryGood => "Very Good Match",
            ConfidenceLevel::Good => "Good Match",
            ConfidenceLevel::Fair => "Fair Match",
            ConfidenceLevel::Weak => "Weak Match",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A report type that fits the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSuggestion {
    /// Pattern id.
    #[serde(rename = "type")]
    pub report_type: String,
    pub name: String,
    pub description: String,
    pub confidence: f64,
    pub confidence_level: ConfidenceLevel,
    pub recommended_charts: Vec<String>,
    pub recommended_kpis: Vec<String>,
    pub data_insights: Vec<String>,
    pub sample_questions: Vec<String>,
}

/// Coarse characteristics of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQuality {
    pub has_dates: bool,
    /// Any quantitative (number, currency, percent) column.
    pub has_numbers: bool,
    pub has_categories: bool,
    /// Mean non-null fraction over columns.
    pub data_completeness: f64,
    pub suitable_for_trends: bool,
    pub suitable_for_comparisons: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSummary {
    pub total_columns: usize,
    pub total_rows: usize,
    /// Column count per type, in first-seen order.
    pub column_types: IndexMap<String, usize>,
    pub data_quality: DataQuality,
}

/// Suggestions bundled with a summary of the data and recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSuggestions {
    pub data_summary: DataSummary,
    pub report_suggestions: Vec<ReportSuggestion>,
    pub recommendations: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// Ranks catalog patterns by how well a profile's columns fit them.
#[derive(Debug, Clone)]
pub struct ReportTypeSuggester {
    catalog: Arc<PatternCatalog>,
}

impl Default for ReportTypeSuggester {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportTypeSuggester {
    /// Suggester over the built-in catalog.
    pub fn new() -> Self {
        Self {
            catalog: PatternCatalog::builtin(),
        }
    }

    pub fn with_catalog(catalog: Arc<PatternCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// Patterns whose score reaches their threshold, best first.
    ///
    /// Ties keep catalog order.
    pub fn suggest(&self, profile: &DataProfile) -> Vec<ReportSuggestion> {
        let names: Vec<String> = profile
            .columns()
            .iter()
            .map(|c| c.name().to_lowercase())
            .collect();

        let mut suggestions: Vec<ReportSuggestion> = self
            .catalog
            .iter()
            .filter_map(|(id, pattern)| {
                let score = score_pattern(pattern, &names, profile);
                let threshold = pattern.confidence_threshold;
                debug!(pattern = id, score, threshold, "scored pattern");
                (score >= threshold).then(|| build_suggestion(id, pattern, score))
            })
            .collect();

        suggestions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        suggestions
    }

    /// Like [`suggest`](Self::suggest), from the profile's dictionary form.
    pub fn suggest_value(&self, profile: Value) -> Result<Vec<ReportSuggestion>> {
        Ok(self.suggest(&DataProfile::from_value(profile)?))
    }

    /// Score of a single pattern, in [0, 1].
    pub fn score(&self, pattern: &ReportPattern, profile: &DataProfile) -> f64 {
        let names: Vec<String> = profile
            .columns()
            .iter()
            .map(|c| c.name().to_lowercase())
            .collect();
        score_pattern(pattern, &names, profile)
    }

    /// Suggestions plus data summary and recommendations.
    pub fn template_suggestions(&self, profile: &DataProfile) -> TemplateSuggestions {
        let suggestions = self.suggest(profile);
        let quality = assess_quality(profile);

        let mut column_types: IndexMap<String, usize> = IndexMap::new();
        for column in profile.columns() {
            *column_types.entry(column.column_type().to_string()).or_default() += 1;
        }

        let advice = recommendations(&suggestions, &quality);

        TemplateSuggestions {
            data_summary: DataSummary {
                total_columns: profile.column_count(),
                total_rows: profile.row_count(),
                column_types,
                data_quality: quality,
            },
            report_suggestions: suggestions,
            recommendations: advice,
            generated_at: Utc::now(),
        }
    }
}

fn build_suggestion(id: &str, pattern: &ReportPattern, score: f64) -> ReportSuggestion {
    ReportSuggestion {
        report_type: id.to_string(),
        name: pattern.name.clone(),
        description: pattern.description.clone(),
        confidence: score,
        confidence_level: ConfidenceLevel::from_score(score),
        recommended_charts: pattern.chart_types.clone(),
        recommended_kpis: pattern.kpi_types.clone(),
        data_insights: pattern.data_insights.iter().take(MAX_INSIGHTS).cloned().collect(),
        sample_questions: pattern.sample_questions.iter().take(MAX_QUESTIONS).cloned().collect(),
    }
}

fn score_pattern(pattern: &ReportPattern, names: &[String], profile: &DataProfile) -> f64 {
    let mut score = 0.0;

    if !pattern.required_columns.is_empty() {
        let required: f64 = pattern
            .required_columns
            .iter()
            .map(|group| name_match_score(group, names))
            .sum();
        score += required / pattern.required_columns.len() as f64 * REQUIRED_WEIGHT;
    }

    let optional: Vec<f64> = pattern
        .optional_columns
        .iter()
        .map(|opt| name_match_score(std::slice::from_ref(opt), names))
        .filter(|s| *s > 0.0)
        .collect();
    if !optional.is_empty() {
        score += optional.iter().sum::<f64>() / optional.len() as f64 * OPTIONAL_WEIGHT;
    }

    score += type_score(pattern.type_requirement, profile) * TYPE_WEIGHT;

    score.clamp(0.0, 1.0)
}

/// 1.0 when a column name contains a synonym, 0.8 when one only shares
/// enough words with a synonym, otherwise 0.0.
fn name_match_score(synonyms: &[String], names: &[String]) -> f64 {
    let synonyms: Vec<String> = synonyms.iter().map(|s| s.to_lowercase()).collect();

    if names
        .iter()
        .any(|name| synonyms.iter().any(|s| name.contains(s.as_str())))
    {
        1.0
    } else if names
        .iter()
        .any(|name| synonyms.iter().any(|s| is_similar(s, name)))
    {
        SIMILAR_SCORE
    } else {
        0.0
    }
}

/// Jaccard similarity over word sets reaches the threshold.
fn is_similar(target: &str, actual: &str) -> bool {
    let target_words: HashSet<&str> = WORD_PATTERN.find_iter(target).map(|m| m.as_str()).collect();
    let actual_words: HashSet<&str> = WORD_PATTERN.find_iter(actual).map(|m| m.as_str()).collect();
    if target_words.is_empty() || actual_words.is_empty() {
        return false;
    }

    let intersection = target_words.intersection(&actual_words).count();
    let union = target_words.union(&actual_words).count();
    intersection as f64 / union as f64 >= SIMILARITY_THRESHOLD
}

fn type_score(requirement: TypeRequirement, profile: &DataProfile) -> f64 {
    let present = |t: ColumnType| {
        if profile.columns_of_type(t).is_empty() {
            0.0
        } else {
            1.0
        }
    };
    match requirement {
        TypeRequirement::None => 0.0,
        TypeRequirement::DateColumn => present(ColumnType::Date),
        TypeRequirement::CategoricalColumn => present(ColumnType::String),
        TypeRequirement::QuantitativeColumns => match profile.quantitative_columns().len() {
            0 => 0.0,
            1 => 0.5,
            _ => 1.0,
        },
    }
}

/// Characteristics of the data relevant to report choice.
pub fn assess_quality(profile: &DataProfile) -> DataQuality {
    let columns = profile.columns();
    let has_dates = !profile.columns_of_type(ColumnType::Date).is_empty();
    let strings = profile.columns_of_type(ColumnType::String).len();

    let data_completeness = if columns.is_empty() {
        0.0
    } else {
        columns.iter().map(|c| c.stats().completeness()).sum::<f64>() / columns.len() as f64
    };

    DataQuality {
        has_dates,
        has_numbers: !profile.quantitative_columns().is_empty(),
        has_categories: strings > 0,
        data_completeness,
        suitable_for_trends: has_dates,
        suitable_for_comparisons: strings >= 2,
    }
}

/// Actionable advice derived from suggestions and data quality.
pub fn recommendations(suggestions: &[ReportSuggestion], quality: &DataQuality) -> Vec<String> {
    let Some(top) = suggestions.first() else {
        return vec![
            "Consider adding more structured data with clear categories and metrics".to_string(),
            "Include date columns for trend analysis capabilities".to_string(),
            "Add numeric columns for quantitative analysis".to_string(),
        ];
    };

    let mut out = Vec::new();
    if top.confidence >= 0.8 {
        out.push(format!("'{}' is an excellent choice for your data", top.name));
        out.push(format!(
            "Focus on {} charts for best visualization",
            top.recommended_charts.join(", ")
        ));
    }

    if !quality.has_dates {
        out.push("Add date columns to enable trend analysis and time-based reporting".to_string());
    }
    if !quality.has_numbers {
        out.push(
            "Include numeric columns for quantitative analysis and KPI calculations".to_string(),
        );
    }
    if !quality.suitable_for_comparisons {
        out.push("Add categorical columns for grouping and comparison analysis".to_string());
    }

    if suggestions.len() > 1 {
        let others: Vec<&str> = suggestions[1..]
            .iter()
            .take(2)
            .map(|s| s.name.as_str())
            .collect();
        out.push(format!("Also consider: {}", others.join(", ")));
    }

    out.truncate(MAX_RECOMMENDATIONS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::ColumnTypeClassifier;
    use crate::input::Dataset;

    fn profile(pairs: Vec<(&str, Vec<&str>)>) -> DataProfile {
        let dataset = Dataset::from_pairs(pairs).unwrap();
        DataProfile::from_dataset(&dataset, &ColumnTypeClassifier::new())
    }

    fn budget_profile() -> DataProfile {
        profile(vec![
            ("Department", vec!["Finance", "Health", "Parks"]),
            ("Budget", vec!["$1,000", "$2,000", "$3,000"]),
            ("Actual", vec!["$900", "$2,100", "$2,500"]),
            ("Variance", vec!["-10%", "5%", "-16.7%"]),
            ("Date", vec!["2024-01-31", "2024-02-29", "2024-03-31"]),
        ])
    }

    #[test]
    fn test_confidence_levels() {
        assert_eq!(ConfidenceLevel::from_score(0.95), ConfidenceLevel::Excellent);
        assert_eq!(ConfidenceLevel::from_score(0.8), ConfidenceLevel::VeryGood);
        assert_eq!(ConfidenceLevel::from_score(0.7), ConfidenceLevel::Good);
        assert_eq!(ConfidenceLevel::from_score(0.6), ConfidenceLevel::Fair);
        assert_eq!(ConfidenceLevel::from_score(0.2), ConfidenceLevel::Weak);
        assert_eq!(
            serde_json::to_string(&ConfidenceLevel::VeryGood).unwrap(),
            "\"Very Good Match\""
        );
    }

    #[test]
    fn test_budget_ranked_first() {
        let suggestions = ReportTypeSuggester::new().suggest(&budget_profile());
        let ids: Vec<&str> = suggestions.iter().map(|s| s.report_type.as_str()).collect();

        assert_eq!(ids[0], "budget_performance");
        let budget = ids.iter().position(|id| *id == "budget_performance").unwrap();
        let trend = ids.iter().position(|id| *id == "trend_analysis").unwrap();
        assert!(budget < trend);

        let top = &suggestions[0];
        assert!((top.confidence - 1.0).abs() < 1e-9);
        assert_eq!(top.confidence_level, ConfidenceLevel::Excellent);
        assert_eq!(top.data_insights.len(), 3);
        assert_eq!(top.sample_questions.len(), 3);
    }

    #[test]
    fn test_similar_name_scores_partial() {
        assert_eq!(name_match_score(&["budget".into()], &["budget".into()]), 1.0);
        assert_eq!(
            name_match_score(&["response time".into()], &["time response".into()]),
            SIMILAR_SCORE
        );
        assert_eq!(name_match_score(&["budget".into()], &["spend".into()]), 0.0);
    }

    #[test]
    fn test_type_bonus_counts_quantitative() {
        let catalog = PatternCatalog::builtin();
        let pattern = catalog.get("financial_summary").unwrap();
        let suggester = ReportTypeSuggester::new();

        let one = profile(vec![("Amount", vec!["$5", "$6"])]);
        let two = profile(vec![("Amount", vec!["$5", "$6"]), ("Share", vec!["5%", "6%"])]);
        // Required 0.6 plus half or full type bonus
        assert!((suggester.score(pattern, &one) - 0.65).abs() < 1e-9);
        assert!((suggester.score(pattern, &two) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_no_suggestions_recommendations() {
        let p = profile(vec![("zzz", vec!["a", "b"])]);
        let bundle = ReportTypeSuggester::new().template_suggestions(&p);
        assert!(bundle.report_suggestions.is_empty());
        assert_eq!(bundle.recommendations.len(), 3);
        assert!(bundle.recommendations[0].starts_with("Consider adding more structured data"));
    }

    #[test]
    fn test_template_suggestions_summary() {
        let bundle = ReportTypeSuggester::new().template_suggestions(&budget_profile());
        let summary = &bundle.data_summary;
        assert_eq!(summary.total_columns, 5);
        assert_eq!(summary.total_rows, 3);
        assert_eq!(summary.column_types.get("currency"), Some(&2));
        assert!(summary.data_quality.has_dates);
        assert!(summary.data_quality.has_numbers);
        assert!(!summary.data_quality.suitable_for_comparisons);
        assert!((summary.data_quality.data_completeness - 1.0).abs() < 1e-9);

        assert!(bundle.recommendations[0].contains("Budget Performance Report"));
        assert!(bundle.recommendations.len() <= 5);
        assert!(bundle.recommendations.iter().any(|r| r.starts_with("Also consider: ")));
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = PatternCatalog::from_json_str(
            r#"{"grants": {"name": "Grant Report", "description": "Awards",
                "required_columns": [["grant"]], "confidence_threshold": 0.5}}"#,
        )
        .unwrap();
        let suggester = ReportTypeSuggester::with_catalog(Arc::new(catalog));
        let suggestions = suggester.suggest(&profile(vec![("Grant ID", vec!["G-1", "G-2"])]));
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].report_type, "grants");
        assert!((suggestions[0].confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_suggest_from_dictionary_form() {
        let value = budget_profile().to_value().unwrap();
        let suggestions = ReportTypeSuggester::new().suggest_value(value).unwrap();
        assert_eq!(suggestions[0].report_type, "budget_performance");
    }

    #[test]
    fn test_suggestion_dictionary_round_trip() {
        let suggestions = ReportTypeSuggester::new().suggest(&budget_profile());
        let first = suggestions.first().unwrap();

        let value = serde_json::to_value(first).unwrap();
        assert_eq!(value["type"], first.report_type.as_str());
        assert!(value["confidence_level"].as_str().unwrap().ends_with("Match"));

        let restored: ReportSuggestion = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(&restored, first);
        assert_eq!(serde_json::to_value(&restored).unwrap(), value);
    }

    #[test]
    fn test_keywords_do_not_affect_score() {
        let suggester = ReportTypeSuggester::new();
        let profile = budget_profile();
        let mut pattern = suggester.catalog().get("budget_performance").unwrap().clone();
        let before = suggester.score(&pattern, &profile);

        pattern.keywords = vec!["department".to_string(), "budget".to_string()];
        assert_eq!(suggester.score(&pattern, &profile), before);

        pattern.keywords.clear();
        assert_eq!(suggester.score(&pattern, &profile), before);
    }
}
