//! Report specifications and built-in templates.

mod report;
pub mod templates;

pub use report::{
    AxisSpec, ChartSeries, ChartSpec, ChartType, FormatKind, Granularity, Kpi, MetricKind,
    ReferenceLocation, ReportSpec, SortOrder, SortSpec, TableSpec,
};
pub use templates::{builtin_templates, template};
