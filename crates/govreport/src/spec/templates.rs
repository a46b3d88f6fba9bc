//! Built-in government report templates.

use indexmap::IndexMap;

use super::report::{
    AxisSpec, ChartSeries, ChartSpec, ChartType, FormatKind, Granularity, Kpi, MetricKind,
    ReportSpec, SortOrder, SortSpec, TableSpec,
};
use crate::error::{GovReportError, Result};

pub const BUDGET_VS_ACTUAL: &str = "budget_vs_actual";
pub const BALANCE_SHEET: &str = "balance_sheet";
pub const RESPONSE_TIMES: &str = "response_times";

/// All built-in templates keyed by id, in a stable order.
pub fn builtin_templates() -> IndexMap<String, ReportSpec> {
    let mut templates = IndexMap::new();
    templates.insert(BUDGET_VS_ACTUAL.to_string(), budget_vs_actual());
    templates.insert(BALANCE_SHEET.to_string(), balance_sheet());
    templates.insert(RESPONSE_TIMES.to_string(), response_times());
    templates
}

/// Look up one built-in template.
pub fn template(id: &str) -> Result<ReportSpec> {
    builtin_templates()
        .shift_remove(id)
        .ok_or_else(|| GovReportError::UnknownTemplate(id.to_string()))
}

fn budget_vs_actual() -> ReportSpec {
    ReportSpec {
        kpis: vec![
            Kpi::new("Total Budget", MetricKind::Sum)
                .with_column("Budget")
                .with_format(FormatKind::Currency)
                .with_description("Sum of all budget allocations"),
            Kpi::new("Total Actual", MetricKind::Sum)
                .with_column("Actual")
                .with_format(FormatKind::Currency)
                .with_description("Sum of all actual spending"),
            Kpi::new("Average Variance", MetricKind::Average)
                .with_column("Variance")
                .with_format(FormatKind::Percent)
                .with_description("Average variance across departments"),
        ],
        charts: vec![
            ChartSpec::new(
                ChartType::Bar,
                "Budget vs Actual by Department",
                AxisSpec::column("Department"),
            )
            .with_series(ChartSeries::new("Budget", MetricKind::Sum, "Budget"))
            .with_series(ChartSeries::new("Actual", MetricKind::Sum, "Actual"))
            .with_description("Comparison of budgeted vs actual spending by department"),
            ChartSpec::new(
                ChartType::Pie,
                "Budget Distribution",
                AxisSpec::column("Department"),
            )
            .with_series(ChartSeries::new("Budget Share", MetricKind::Sum, "Budget"))
            .with_description("Distribution of total budget across departments"),
        ],
        tables: vec![
            TableSpec::new("Department Summary", ["Department", "Budget", "Actual", "Variance"])
                .with_sort(SortSpec::new("Budget", SortOrder::Descending))
                .with_limit(10)
                .with_zebra_rows()
                .with_description("Detailed breakdown by department"),
        ],
        narrative_goals: vec![
            "Identify departments with significant budget variances".into(),
            "Highlight areas of over/under spending".into(),
            "Provide recommendations for budget adjustments".into(),
        ],
        template: Some(BUDGET_VS_ACTUAL.into()),
        description: Some("Quarterly budget performance report for city departments".into()),
        ..ReportSpec::new("Budget vs Actual Report")
    }
}

fn balance_sheet() -> ReportSpec {
    ReportSpec {
        kpis: vec![
            Kpi::new("Total Assets", MetricKind::Sum)
                .with_column("Assets")
                .with_format(FormatKind::Currency),
            Kpi::new("Total Liabilities", MetricKind::Sum)
                .with_column("Liabilities")
                .with_format(FormatKind::Currency),
            Kpi::new("Net Position", MetricKind::Formula)
                .with_column("NetPosition")
                .with_format(FormatKind::Currency),
        ],
        charts: vec![
            ChartSpec::new(
                ChartType::Pie,
                "Asset Distribution",
                AxisSpec::column("AssetCategory"),
            )
            .with_series(ChartSeries::new("Value", MetricKind::Sum, "Value")),
        ],
        tables: vec![
            TableSpec::new("Asset Breakdown", ["AssetCategory", "Value", "Percentage"])
                .with_sort(SortSpec::new("Value", SortOrder::Descending)),
        ],
        narrative_goals: vec![
            "Assess financial position and stability".into(),
            "Identify major asset categories".into(),
            "Evaluate debt levels and obligations".into(),
        ],
        template: Some(BALANCE_SHEET.into()),
        ..ReportSpec::new("Balance Sheet Report")
    }
}

fn response_times() -> ReportSpec {
    ReportSpec {
        kpis: vec![
            Kpi::new("Average Response Time", MetricKind::Average)
                .with_column("ResponseTime")
                .with_format(FormatKind::Number),
            Kpi::new("Total Requests", MetricKind::Count).with_column("RequestID"),
            Kpi::new("On-Time Rate", MetricKind::Formula)
                .with_column("OnTimeRate")
                .with_format(FormatKind::Percent),
        ],
        charts: vec![
            ChartSpec::new(
                ChartType::Line,
                "Response Times Over Time",
                AxisSpec::column("Date").with_granularity(Granularity::Week),
            )
            .with_series(ChartSeries::new("Response Time", MetricKind::Average, "ResponseTime")),
        ],
        tables: vec![
            TableSpec::new(
                "Response Times by Category",
                ["Category", "AvgResponseTime", "TotalRequests", "OnTimeRate"],
            )
            .with_sort(SortSpec::new("AvgResponseTime", SortOrder::Ascending)),
        ],
        narrative_goals: vec![
            "Monitor service performance trends".into(),
            "Identify categories with slow response times".into(),
            "Track improvement initiatives".into(),
        ],
        template: Some(RESPONSE_TIMES.into()),
        ..ReportSpec::new("311 Response Times Report")
    }
}
