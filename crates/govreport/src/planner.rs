//! Deterministic report planning from a data profile.
//!
//! The planner picks a report kind from column names and types, then lays
//! out KPIs, a chart, a summary table and narrative goals for it. Every
//! column it references comes from the profile, except where a built-in
//! template is requested by id.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::profile::{ColumnProfile, ColumnType, DataProfile};
use crate::spec::{
    AxisSpec, ChartSeries, ChartSpec, ChartType, FormatKind, Kpi, MetricKind, ReportSpec, TableSpec,
    templates,
};

const BUDGET_KEYWORDS: &[&str] = &["budget", "planned", "allocated"];
const ACTUAL_KEYWORDS: &[&str] = &["actual", "spent", "expended"];
const DEPARTMENT_KEYWORDS: &[&str] = &["department", "division", "unit", "agency", "bureau"];
const FINANCIAL_KEYWORDS: &[&str] = &["revenue", "income", "expense", "cost", "amount", "total"];
const METRIC_KEYWORDS: &[&str] = &["score", "rating", "performance", "efficiency", "target"];

const SUMMARY_COLUMNS: usize = 5;
const SUMMARY_LIMIT: usize = 20;
const TITLE_DESCRIPTION_CHARS: usize = 50;

/// Kind of report the planner builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    BudgetPerformance,
    FinancialSummary,
    OperationalMetrics,
    TrendAnalysis,
    DataSummary,
}

impl ReportKind {
    pub fn id(&self) -> &'static str {
        match self {
            ReportKind::BudgetPerformance => "budget_performance",
            ReportKind::FinancialSummary => "financial_summary",
            ReportKind::OperationalMetrics => "operational_metrics",
            ReportKind::TrendAnalysis => "trend_analysis",
            ReportKind::DataSummary => "data_summary",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::BudgetPerformance => "Budget Performance Analysis",
            ReportKind::FinancialSummary => "Financial Summary Report",
            ReportKind::OperationalMetrics => "Operational Metrics Report",
            ReportKind::TrendAnalysis => "Trend Analysis Report",
            ReportKind::DataSummary => "Data Summary Report",
        }
    }

    fn narrative_goals(&self) -> [&'static str; 3] {
        match self {
            ReportKind::BudgetPerformance => [
                "Analyze budget performance across departments",
                "Identify areas of over/under spending",
                "Provide recommendations for budget optimization",
            ],
            ReportKind::FinancialSummary => [
                "Summarize key financial metrics",
                "Identify revenue and expense patterns",
                "Highlight financial performance insights",
            ],
            ReportKind::OperationalMetrics => [
                "Assess operational performance indicators",
                "Identify areas for improvement",
                "Track progress against targets",
            ],
            ReportKind::TrendAnalysis => [
                "Identify key trends and patterns",
                "Analyze seasonal variations",
                "Forecast future performance",
            ],
            ReportKind::DataSummary => [
                "Provide comprehensive data overview",
                "Identify key patterns and insights",
                "Support data-driven decision making",
            ],
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Builds a [`ReportSpec`] from a profile without any external service.
#[derive(Debug, Clone, Default)]
pub struct TemplatePlanner;

impl TemplatePlanner {
    pub fn new() -> Self {
        Self
    }

    /// Plan a report for `profile`.
    ///
    /// A `template_hint` naming a built-in template returns that template
    /// unchanged; any other hint is ignored.
    pub fn plan(
        &self,
        profile: &DataProfile,
        description: &str,
        template_hint: Option<&str>,
    ) -> ReportSpec {
        if let Some(hint) = template_hint {
            match templates::template(hint) {
                Ok(spec) => {
                    info!(template = hint, "using built-in template");
                    return spec;
                }
                Err(e) => warn!("{}; planning from the data instead", e),
            }
        }

        let kind = classify(profile);
        let columns = ColumnGroups::new(profile);

        let spec = ReportSpec {
            kpis: kpis_for(kind, &columns),
            charts: charts_for(kind, &columns),
            tables: summary_table(kind, profile),
            narrative_goals: kind.narrative_goals().iter().map(|g| g.to_string()).collect(),
            description: Some(format!(
                "Planned {} report derived from the data profile",
                kind.id().replace('_', " ")
            )),
            ..ReportSpec::new(report_title(kind, description))
        };

        info!(
            kind = %kind,
            kpis = spec.kpis.len(),
            charts = spec.charts.len(),
            "planned report"
        );
        spec
    }
}

/// Decide the report kind from column names and types.
pub fn classify(profile: &DataProfile) -> ReportKind {
    let columns = ColumnGroups::new(profile);

    let has_budget = columns
        .money()
        .any(|c| name_has(c, BUDGET_KEYWORDS) || name_has(c, ACTUAL_KEYWORDS));
    let has_department = columns.strings.iter().any(|c| name_has(c, DEPARTMENT_KEYWORDS));
    if has_budget && has_department {
        return ReportKind::BudgetPerformance;
    }

    if columns.money().any(|c| name_has(c, FINANCIAL_KEYWORDS)) {
        return ReportKind::FinancialSummary;
    }

    let has_metrics = columns
        .numbers
        .iter()
        .chain(columns.percents.iter())
        .any(|c| name_has(c, METRIC_KEYWORDS));
    if has_metrics {
        return ReportKind::OperationalMetrics;
    }

    if !columns.dates.is_empty() && columns.quantitative().next().is_some() {
        return ReportKind::TrendAnalysis;
    }

    ReportKind::DataSummary
}

/// Profile columns split by type, each in source order.
struct ColumnGroups<'a> {
    numbers: Vec<&'a ColumnProfile>,
    currencies: Vec<&'a ColumnProfile>,
    percents: Vec<&'a ColumnProfile>,
    strings: Vec<&'a ColumnProfile>,
    dates: Vec<&'a ColumnProfile>,
}

impl<'a> ColumnGroups<'a> {
    fn new(profile: &'a DataProfile) -> Self {
        Self {
            numbers: profile.columns_of_type(ColumnType::Number),
            currencies: profile.columns_of_type(ColumnType::Currency),
            percents: profile.columns_of_type(ColumnType::Percent),
            strings: profile.columns_of_type(ColumnType::String),
            dates: profile.columns_of_type(ColumnType::Date),
        }
    }

    /// Number and currency columns.
    fn money(&self) -> impl Iterator<Item = &'a ColumnProfile> + '_ {
        self.numbers.iter().chain(self.currencies.iter()).copied()
    }

    /// Number, currency and percent columns.
    fn quantitative(&self) -> impl Iterator<Item = &'a ColumnProfile> + '_ {
        self.money().chain(self.percents.iter().copied())
    }
}

fn name_has(column: &ColumnProfile, keywords: &[&str]) -> bool {
    let name = column.name().to_lowercase();
    keywords.iter().any(|k| name.contains(k))
}

fn format_for(column: &ColumnProfile) -> FormatKind {
    match column.column_type() {
        ColumnType::Currency => FormatKind::Currency,
        ColumnType::Percent => FormatKind::Percent,
        _ => FormatKind::Number,
    }
}

fn kpis_for(kind: ReportKind, columns: &ColumnGroups<'_>) -> Vec<Kpi> {
    let mut kpis = Vec::new();

    match kind {
        ReportKind::BudgetPerformance => {
            let budget = columns.money().find(|c| name_has(c, BUDGET_KEYWORDS));
            let actual = columns.money().find(|c| name_has(c, ACTUAL_KEYWORDS));
            if let (Some(budget), Some(actual)) = (budget, actual) {
                kpis.push(
                    Kpi::new("Total Budget", MetricKind::Sum)
                        .with_column(budget.name())
                        .with_format(format_for(budget)),
                );
                kpis.push(
                    Kpi::new("Total Actual", MetricKind::Sum)
                        .with_column(actual.name())
                        .with_format(format_for(actual)),
                );
                let variance = columns.quantitative().find(|c| name_has(c, &["variance"]));
                if let Some(variance) = variance {
                    kpis.push(
                        Kpi::new("Budget Variance", MetricKind::Average)
                            .with_column(variance.name())
                            .with_format(format_for(variance)),
                    );
                }
            }
        }
        ReportKind::FinancialSummary => {
            let revenue = columns
                .money()
                .find(|c| name_has(c, &["revenue", "income", "amount", "total"]));
            if let Some(col) = revenue {
                let label = title_case(col.name());
                kpis.push(
                    Kpi::new(format!("Total {}", label), MetricKind::Sum)
                        .with_column(col.name())
                        .with_format(format_for(col)),
                );
                kpis.push(
                    Kpi::new(format!("Average {}", label), MetricKind::Average)
                        .with_column(col.name())
                        .with_format(format_for(col)),
                );
            }
        }
        ReportKind::OperationalMetrics => {
            let metric = columns
                .numbers
                .iter()
                .chain(columns.percents.iter())
                .find(|c| name_has(c, &["score", "rating", "performance"]));
            if let Some(col) = metric {
                let label = title_case(col.name());
                kpis.push(
                    Kpi::new(format!("Average {}", label), MetricKind::Average)
                        .with_column(col.name())
                        .with_format(format_for(col)),
                );
                kpis.push(
                    Kpi::new(format!("Best {}", label), MetricKind::Maximum)
                        .with_column(col.name())
                        .with_format(format_for(col)),
                );
            }
        }
        ReportKind::TrendAnalysis | ReportKind::DataSummary => {}
    }

    if kpis.is_empty() {
        if let Some(col) = columns.quantitative().next() {
            kpis.push(
                Kpi::new(format!("Total {}", title_case(col.name())), MetricKind::Sum)
                    .with_column(col.name())
                    .with_format(format_for(col)),
            );
        }
    }

    kpis
}

fn charts_for(kind: ReportKind, columns: &ColumnGroups<'_>) -> Vec<ChartSpec> {
    if kind == ReportKind::BudgetPerformance {
        let budget = columns.money().find(|c| name_has(c, BUDGET_KEYWORDS));
        let actual = columns.money().find(|c| name_has(c, ACTUAL_KEYWORDS));
        let department = columns.strings.iter().find(|c| name_has(c, DEPARTMENT_KEYWORDS));
        if let (Some(budget), Some(actual), Some(department)) = (budget, actual, department) {
            return vec![
                ChartSpec::new(
                    ChartType::Bar,
                    "Budget vs Actual by Department",
                    AxisSpec::column(department.name()),
                )
                .with_series(ChartSeries::new("Budget", MetricKind::Sum, budget.name()))
                .with_series(ChartSeries::new("Actual", MetricKind::Sum, actual.name()))
                .with_description("Comparison of budgeted vs actual spending across departments"),
            ];
        }
    }

    let Some(measure) = columns.quantitative().next() else {
        return Vec::new();
    };
    let measure_label = title_case(measure.name());

    if kind == ReportKind::TrendAnalysis {
        if let Some(date) = columns.dates.first() {
            return vec![
                ChartSpec::new(
                    ChartType::Line,
                    format!("{} Over Time", measure_label),
                    AxisSpec::column(date.name()),
                )
                .with_series(ChartSeries::new(
                    measure_label.clone(),
                    MetricKind::Sum,
                    measure.name(),
                ))
                .with_description(format!("Trend analysis of {} over time", measure.name())),
            ];
        }
    }

    match columns.strings.first() {
        Some(category) => vec![
            ChartSpec::new(
                ChartType::Bar,
                format!("{} by {}", measure_label, title_case(category.name())),
                AxisSpec::column(category.name()),
            )
            .with_series(ChartSeries::new(measure_label.clone(), MetricKind::Sum, measure.name()))
            .with_description(format!(
                "Distribution of {} across {}",
                measure.name(),
                category.name()
            )),
        ],
        None => Vec::new(),
    }
}

fn summary_table(kind: ReportKind, profile: &DataProfile) -> Vec<TableSpec> {
    if profile.columns().is_empty() {
        return Vec::new();
    }

    let columns = profile.column_names().into_iter().take(SUMMARY_COLUMNS);
    vec![
        TableSpec::new(format!("{} - Data Summary", kind.title()), columns)
            .with_limit(SUMMARY_LIMIT)
            .with_zebra_rows()
            .with_description(format!(
                "Summary data for {}",
                title_case(&kind.id().replace('_', " "))
            )),
    ]
}

fn report_title(kind: ReportKind, description: &str) -> String {
    let description = description.trim();
    if description.is_empty() {
        return kind.title().to_string();
    }
    if description.chars().count() > TITLE_DESCRIPTION_CHARS {
        let short: String = description.chars().take(TITLE_DESCRIPTION_CHARS).collect();
        format!("{}: {}...", kind.title(), short.trim_end())
    } else {
        format!("{}: {}", kind.title(), description)
    }
}

/// Capitalize the first letter of every alphabetic run, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::ColumnTypeClassifier;
    use crate::input::Dataset;
    use crate::validation::validate_spec;

    fn profile(pairs: Vec<(&str, Vec<&str>)>) -> DataProfile {
        let dataset = Dataset::from_pairs(pairs).unwrap();
        DataProfile::from_dataset(&dataset, &ColumnTypeClassifier::new())
    }

    fn budget_profile() -> DataProfile {
        profile(vec![
            ("Department", vec!["Finance", "Health"]),
            ("Budget", vec!["$1,000", "$2,000"]),
            ("Actual", vec!["$900", "$2,100"]),
            ("Variance", vec!["-10%", "5%"]),
            ("Date", vec!["2024-01-31", "2024-02-29"]),
            ("Notes", vec!["ok", "late"]),
        ])
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(&budget_profile()), ReportKind::BudgetPerformance);
        assert_eq!(
            classify(&profile(vec![("Revenue", vec!["100", "200"])])),
            ReportKind::FinancialSummary
        );
        assert_eq!(
            classify(&profile(vec![("Score", vec!["7", "9"])])),
            ReportKind::OperationalMetrics
        );
        assert_eq!(
            classify(&profile(vec![
                ("Date", vec!["2024-01-01", "2024-02-01"]),
                ("Riders", vec!["10", "12"]),
            ])),
            ReportKind::TrendAnalysis
        );
        assert_eq!(
            classify(&profile(vec![("Name", vec!["a", "b"])])),
            ReportKind::DataSummary
        );
    }

    #[test]
    fn test_budget_plan_is_valid() {
        let profile = budget_profile();
        let spec = TemplatePlanner::new().plan(&profile, "Quarterly budget review", None);

        assert_eq!(spec.title, "Budget Performance Analysis: Quarterly budget review");
        let kpi_columns: Vec<&str> = spec.kpis.iter().filter_map(|k| k.column_ref()).collect();
        assert_eq!(kpi_columns, vec!["Budget", "Actual", "Variance"]);
        assert_eq!(spec.kpis[0].format, Some(FormatKind::Currency));
        assert_eq!(spec.charts[0].x.column.as_deref(), Some("Department"));
        assert_eq!(spec.charts[0].series.len(), 2);

        let table = &spec.tables[0];
        assert_eq!(table.columns, vec!["Department", "Budget", "Actual", "Variance", "Date"]);
        assert_eq!(table.limit, Some(20));
        assert!(table.zebra_rows);
        assert_eq!(spec.narrative_goals.len(), 3);

        assert!(validate_spec(&spec, &profile).is_empty());
    }

    #[test]
    fn test_trend_plan() {
        let p = profile(vec![
            ("Date", vec!["2024-01-01", "2024-02-01"]),
            ("riders", vec!["10", "12"]),
        ]);
        let spec = TemplatePlanner::new().plan(&p, "", None);
        assert_eq!(spec.title, "Trend Analysis Report");
        assert_eq!(spec.charts[0].chart_type, ChartType::Line);
        assert_eq!(spec.charts[0].title, "Riders Over Time");
        assert_eq!(spec.kpis[0].label, "Total Riders");
        assert!(validate_spec(&spec, &p).is_empty());
    }

    #[test]
    fn test_template_hint() {
        let spec = TemplatePlanner::new().plan(&budget_profile(), "x", Some("balance_sheet"));
        assert_eq!(spec.template.as_deref(), Some("balance_sheet"));

        let spec = TemplatePlanner::new().plan(&budget_profile(), "x", Some("no_such_template"));
        assert!(spec.template.is_none());
    }

    #[test]
    fn test_long_description_truncated() {
        let description = "a".repeat(80);
        let title = report_title(ReportKind::DataSummary, &description);
        assert_eq!(title, format!("Data Summary Report: {}...", "a".repeat(50)));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("response_time"), "Response_Time");
        assert_eq!(title_case("TOTAL amount"), "Total Amount");
    }

    #[test]
    fn test_empty_profile() {
        let spec = TemplatePlanner::new().plan(&DataProfile::new(vec![]), "", None);
        assert!(spec.kpis.is_empty());
        assert!(spec.charts.is_empty());
        assert!(spec.tables.is_empty());
    }
}
