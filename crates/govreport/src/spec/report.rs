//! Declarative report specification: KPIs, charts, and tables that refer
//! to dataset columns by name.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{GovReportError, Result};

/// Aggregation applied to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    #[serde(rename = "sum")]
    Sum,
    #[serde(rename = "avg", alias = "average", alias = "mean")]
    Average,
    #[serde(rename = "min")]
    Minimum,
    #[serde(rename = "max")]
    Maximum,
    #[serde(rename = "count")]
    Count,
    /// Derived value computed by a formula rather than a single aggregation.
    #[serde(rename = "formula")]
    Formula,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Sum => "sum",
            MetricKind::Average => "avg",
            MetricKind::Minimum => "min",
            MetricKind::Maximum => "max",
            MetricKind::Count => "count",
            MetricKind::Formula => "formula",
        }
    }
}

/// Display format of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    Currency,
    Percent,
    Number,
    Date,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    Bar,
    Line,
    Pie,
}

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Pie => "pie",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

/// Time bucket for a date axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

/// Sort instruction for a chart or table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
    pub by: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(by: impl Into<String>, order: SortOrder) -> Self {
        Self { by: by.into(), order }
    }
}

/// Key performance indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub label: String,
    pub metric: MetricKind,
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default)]
    pub filter: Option<Map<String, Value>>,
    #[serde(default)]
    pub format: Option<FormatKind>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Kpi {
    pub fn new(label: impl Into<String>, metric: MetricKind) -> Self {
        Self {
            label: label.into(),
            metric,
            column: None,
            filter: None,
            format: None,
            description: None,
        }
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn with_format(mut self, format: FormatKind) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Referenced column, ignoring blank names.
    pub fn column_ref(&self) -> Option<&str> {
        self.column.as_deref().filter(|c| !c.trim().is_empty())
    }
}

/// X axis of a chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    #[serde(default)]
    pub column: Option<String>,
    /// Optional key on the axis object; omitted when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<Granularity>,
}

impl AxisSpec {
    pub fn column(column: impl Into<String>) -> Self {
        Self {
            column: Some(column.into()),
            granularity: None,
        }
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = Some(granularity);
        self
    }

    /// Referenced column, ignoring blank names.
    pub fn column_ref(&self) -> Option<&str> {
        self.column.as_deref().filter(|c| !c.trim().is_empty())
    }
}

/// One plotted series of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub metric: MetricKind,
    pub column: String,
    #[serde(default)]
    pub filter: Option<Map<String, Value>>,
    #[serde(default)]
    pub color: Option<String>,
}

impl ChartSeries {
    pub fn new(label: impl Into<String>, metric: MetricKind, column: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            metric,
            column: column.into(),
            filter: None,
            color: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub title: String,
    #[serde(default)]
    pub x: AxisSpec,
    #[serde(default)]
    pub series: Vec<ChartSeries>,
    #[serde(default)]
    pub sort: Option<SortSpec>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ChartSpec {
    pub fn new(chart_type: ChartType, title: impl Into<String>, x: AxisSpec) -> Self {
        Self {
            chart_type,
            title: title.into(),
            x,
            series: Vec::new(),
            sort: None,
            limit: None,
            description: None,
        }
    }

    pub fn with_series(mut self, series: ChartSeries) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub title: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub sort: Option<SortSpec>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub zebra_rows: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl TableSpec {
    pub fn new<S: Into<String>>(
        title: impl Into<String>,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            title: title.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            sort: None,
            limit: None,
            zebra_rows: false,
            description: None,
        }
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_zebra_rows(mut self) -> Self {
        self.zebra_rows = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Where a column is referenced inside a [`ReportSpec`].
///
/// Indices address the slot; titles and labels are carried for messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReferenceLocation {
    Kpi {
        kpi: usize,
        label: String,
    },
    ChartAxis {
        chart: usize,
        title: String,
    },
    ChartSeries {
        chart: usize,
        series: usize,
        title: String,
        label: String,
    },
    TableColumn {
        table: usize,
        column: usize,
        title: String,
    },
}

/// A complete report specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSpec {
    pub title: String,
    #[serde(default)]
    pub kpis: Vec<Kpi>,
    #[serde(default)]
    pub charts: Vec<ChartSpec>,
    #[serde(default)]
    pub tables: Vec<TableSpec>,
    #[serde(default)]
    pub narrative_goals: Vec<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ReportSpec {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kpis: Vec::new(),
            charts: Vec::new(),
            tables: Vec::new(),
            narrative_goals: Vec::new(),
            template: None,
            description: None,
        }
    }

    /// Decode a spec from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| GovReportError::MalformedSpec(e.to_string()))
    }

    /// Decode a spec from its dictionary form.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| GovReportError::MalformedSpec(e.to_string()))
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Every column reference in validation order: KPIs, then each chart's
    /// x axis followed by its series, then table columns.
    pub fn column_references(&self) -> Vec<(ReferenceLocation, &str)> {
        let mut refs = Vec::new();

        for (i, kpi) in self.kpis.iter().enumerate() {
            if let Some(column) = kpi.column_ref() {
                refs.push((
                    ReferenceLocation::Kpi {
                        kpi: i,
                        label: kpi.label.clone(),
                    },
                    column,
                ));
            }
        }

        for (i, chart) in self.charts.iter().enumerate() {
            if let Some(column) = chart.x.column_ref() {
                refs.push((
                    ReferenceLocation::ChartAxis {
                        chart: i,
                        title: chart.title.clone(),
                    },
                    column,
                ));
            }
            for (j, series) in chart.series.iter().enumerate() {
                refs.push((
                    ReferenceLocation::ChartSeries {
                        chart: i,
                        series: j,
                        title: chart.title.clone(),
                        label: series.label.clone(),
                    },
                    series.column.as_str(),
                ));
            }
        }

        for (i, table) in self.tables.iter().enumerate() {
            for (j, column) in table.columns.iter().enumerate() {
                refs.push((
                    ReferenceLocation::TableColumn {
                        table: i,
                        column: j,
                        title: table.title.clone(),
                    },
                    column.as_str(),
                ));
            }
        }

        refs
    }

    /// Mutable access to the column name stored at `location`.
    pub(crate) fn column_slot_mut(&mut self, location: &ReferenceLocation) -> Option<&mut String> {
        match location {
            ReferenceLocation::Kpi { kpi, .. } => self.kpis.get_mut(*kpi)?.column.as_mut(),
            ReferenceLocation::ChartAxis { chart, .. } => {
                self.charts.get_mut(*chart)?.x.column.as_mut()
            }
            ReferenceLocation::ChartSeries { chart, series, .. } => self
                .charts
                .get_mut(*chart)?
                .series
                .get_mut(*series)
                .map(|s| &mut s.column),
            ReferenceLocation::TableColumn { table, column, .. } => {
                self.tables.get_mut(*table)?.columns.get_mut(*column)
            }
        }
    }
}
