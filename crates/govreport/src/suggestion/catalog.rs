//! Catalog of report-type patterns.

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{GovReportError, Result};

/// Column types a pattern wants to see, worth a small score bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRequirement {
    /// No type preference.
    #[default]
    None,
    /// At least one date column.
    DateColumn,
    /// Quantitative columns: two or more score fully, one scores half.
    QuantitativeColumns,
    /// At least one string column to group by.
    CategoricalColumn,
}

/// One report type and the column names that indicate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPattern {
    pub name: String,
    pub description: String,
    /// Descriptive tags carried with the catalog. Scoring reads only the
    /// column lists and the type requirement.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Each group is satisfied by any one of its synonyms.
    pub required_columns: Vec<Vec<String>>,
    #[serde(default)]
    pub optional_columns: Vec<String>,
    #[serde(default)]
    pub chart_types: Vec<String>,
    #[serde(default)]
    pub kpi_types: Vec<String>,
    pub confidence_threshold: f64,
    #[serde(default)]
    pub type_requirement: TypeRequirement,
    #[serde(default)]
    pub data_insights: Vec<String>,
    #[serde(default)]
    pub sample_questions: Vec<String>,
}

/// Immutable table of report patterns keyed by id, in scoring order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternCatalog {
    patterns: IndexMap<String, ReportPattern>,
}

static BUILTIN: Lazy<Arc<PatternCatalog>> = Lazy::new(|| Arc::new(builtin_catalog()));

impl PatternCatalog {
    pub fn new(patterns: IndexMap<String, ReportPattern>) -> Self {
        Self { patterns }
    }

    /// The shared built-in catalog of government report types.
    pub fn builtin() -> Arc<PatternCatalog> {
        Arc::clone(&BUILTIN)
    }

    /// Load a catalog from a JSON object of `{id: pattern}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        if catalog.patterns.is_empty() {
            return Err(GovReportError::Config("pattern catalog is empty".to_string()));
        }
        Ok(catalog)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| GovReportError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&json)
    }

    pub fn get(&self, id: &str) -> Option<&ReportPattern> {
        self.patterns.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReportPattern)> {
        self.patterns.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

struct PatternDef {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    keywords: &'static [&'static str],
    required: &'static [&'static [&'static str]],
    optional: &'static [&'static str],
    charts: &'static [&'static str],
    kpis: &'static [&'static str],
    threshold: f64,
    requirement: TypeRequirement,
    insights: &'static [&'static str],
    questions: &'static [&'static str],
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn builtin_catalog() -> PatternCatalog {
    let patterns = BUILTIN_PATTERNS
        .iter()
        .map(|def| {
            let pattern = ReportPattern {
                name: def.name.to_string(),
                description: def.description.to_string(),
                keywords: strings(def.keywords),
                required_columns: def.required.iter().map(|g| strings(g)).collect(),
                optional_columns: strings(def.optional),
                chart_types: strings(def.charts),
                kpi_types: strings(def.kpis),
                confidence_threshold: def.threshold,
                type_requirement: def.requirement,
                data_insights: strings(def.insights),
                sample_questions: strings(def.questions),
            };
            (def.id.to_string(), pattern)
        })
        .collect();
    PatternCatalog::new(patterns)
}

const BUILTIN_PATTERNS: &[PatternDef] = &[
    PatternDef {
        id: "budget_performance",
        name: "Budget Performance Report",
        description: "Analysis of budget vs actual spending with variance calculations",
        keywords: &["budget", "actual", "spending", "expense", "cost", "variance"],
        required: &[
            &["budget", "planned", "allocated", "appropriated", "authorized", "estimated"],
            &["actual", "spent", "expended", "incurred", "paid", "disbursed"],
        ],
        optional: &[
            "department", "category", "date", "variance", "percentage", "division", "unit",
            "program", "fund",
        ],
        charts: &["bar", "line", "pie"],
        kpis: &["sum", "avg", "variance"],
        threshold: 0.6,
        requirement: TypeRequirement::QuantitativeColumns,
        insights: &[
            "Compare budgeted vs actual spending across departments",
            "Identify areas of budget overruns or savings",
            "Calculate variance percentages and trends",
            "Highlight departments with significant budget deviations",
        ],
        questions: &[
            "Which departments are over or under budget?",
            "What is the overall budget variance percentage?",
            "How does this quarter's spending compare to last quarter?",
            "Which budget categories have the highest variances?",
        ],
    },
    PatternDef {
        id: "financial_summary",
        name: "Financial Summary Report",
        description: "Comprehensive financial overview with key metrics and trends",
        keywords: &["revenue", "income", "profit", "loss", "financial", "fiscal"],
        required: &[&[
            "amount", "revenue", "income", "receipts", "collections", "funds", "total", "value",
        ]],
        optional: &[
            "date", "category", "department", "type", "period", "quarter", "year", "fiscal",
        ],
        charts: &["line", "bar", "area"],
        kpis: &["sum", "avg", "trend"],
        threshold: 0.5,
        requirement: TypeRequirement::QuantitativeColumns,
        insights: &[
            "Summarize total revenue and spending",
            "Track financial performance across periods",
            "Break down amounts by category or fund",
        ],
        questions: &[
            "What are our total collections this period?",
            "Which categories contribute most to the total?",
            "How have amounts changed over time?",
        ],
    },
    PatternDef {
        id: "operational_metrics",
        name: "Operational Metrics Report",
        description: "Performance indicators and operational efficiency analysis",
        keywords: &["performance", "efficiency", "metrics", "kpi", "target", "goal"],
        required: &[&[
            "metric", "value", "target", "goal", "performance", "score", "rating", "efficiency",
        ]],
        optional: &["date", "department", "category", "status", "period", "quarter", "month"],
        charts: &["gauge", "bar", "line"],
        kpis: &["comparison", "percentage", "trend"],
        threshold: 0.5,
        requirement: TypeRequirement::None,
        insights: &[
            "Track key performance indicators over time",
            "Compare actual vs target performance",
            "Identify areas needing improvement",
            "Show efficiency trends and patterns",
        ],
        questions: &[
            "Are we meeting our performance targets?",
            "Which metrics show improvement or decline?",
            "What are our efficiency trends?",
            "Where should we focus improvement efforts?",
        ],
    },
    PatternDef {
        id: "department_comparison",
        name: "Department Comparison Report",
        description: "Cross-departmental analysis and benchmarking",
        keywords: &["department", "division", "unit", "compare", "benchmark"],
        required: &[&[
            "department", "division", "unit", "agency", "bureau", "office", "section", "team",
            "program",
        ]],
        optional: &["category", "date", "budget", "actual", "performance", "metric", "value"],
        charts: &["bar", "radar", "table"],
        kpis: &["comparison", "ranking", "percentage"],
        threshold: 0.6,
        requirement: TypeRequirement::CategoricalColumn,
        insights: &[
            "Benchmark departments against each other",
            "Identify top and bottom performers",
            "Show relative performance rankings",
            "Highlight best practices from leading departments",
        ],
        questions: &[
            "Which departments are performing best?",
            "How do departments rank against each other?",
            "What are the performance gaps between departments?",
            "Which departments can learn from others?",
        ],
    },
    PatternDef {
        id: "trend_analysis",
        name: "Trend Analysis Report",
        description: "Time-series analysis showing patterns and trends over time",
        keywords: &["date", "time", "trend", "pattern", "growth", "decline"],
        required: &[&[
            "date", "time", "period", "quarter", "month", "year", "fiscal", "reporting",
        ]],
        optional: &["category", "department", "metric", "value", "performance"],
        charts: &["line", "area", "scatter"],
        kpis: &["trend", "growth_rate", "forecast"],
        threshold: 0.7,
        requirement: TypeRequirement::DateColumn,
        insights: &[
            "Show patterns and trends over time",
            "Identify seasonal variations and growth rates",
            "Forecast future performance based on historical data",
            "Highlight periods of peak performance or decline",
        ],
        questions: &[
            "What are the trends in our key metrics over time?",
            "Are we showing consistent growth or decline?",
            "What seasonal patterns exist in our data?",
            "How can we forecast future performance?",
        ],
    },
    PatternDef {
        id: "compliance_summary",
        name: "Compliance Summary Report",
        description: "Regulatory compliance status and audit findings",
        keywords: &["compliance", "audit", "regulation", "status", "finding", "violation"],
        required: &[&[
            "status", "compliance", "audit", "finding", "violation", "regulation", "requirement",
        ]],
        optional: &["date", "department", "regulation", "finding", "severity", "action"],
        charts: &["pie", "bar", "table"],
        kpis: &["percentage", "count", "status"],
        threshold: 0.6,
        requirement: TypeRequirement::None,
        insights: &[
            "Summarize compliance status across programs",
            "Identify open audit findings by severity",
            "Track corrective actions to closure",
        ],
        questions: &[
            "What share of requirements are in compliance?",
            "Which findings are still open?",
            "Which departments have the most violations?",
        ],
    },
    PatternDef {
        id: "resource_allocation",
        name: "Resource Allocation Report",
        description: "Resource distribution and utilization analysis",
        keywords: &["resource", "allocation", "utilization", "capacity", "workload"],
        required: &[&[
            "resource", "allocation", "utilization", "capacity", "workload", "staffing", "fte",
            "hours",
        ]],
        optional: &["department", "date", "utilization", "capacity", "efficiency", "productivity"],
        charts: &["pie", "bar", "gauge"],
        kpis: &["percentage", "efficiency", "utilization"],
        threshold: 0.5,
        requirement: TypeRequirement::None,
        insights: &[
            "Show how resources are distributed",
            "Compare utilization against capacity",
            "Identify over- and under-allocated units",
        ],
        questions: &[
            "Where is capacity under-used?",
            "Which units carry the heaviest workload?",
            "How has staffing changed over time?",
        ],
    },
    PatternDef {
        id: "customer_service",
        name: "Customer Service Report",
        description: "Service quality metrics and customer satisfaction analysis",
        keywords: &["customer", "service", "satisfaction", "response", "quality"],
        required: &[&[
            "satisfaction", "response_time", "quality", "rating", "score", "feedback",
            "complaint",
        ]],
        optional: &["date", "agent", "category", "rating", "department", "service_type"],
        charts: &["gauge", "bar", "line"],
        kpis: &["avg", "percentage", "trend"],
        threshold: 0.5,
        requirement: TypeRequirement::None,
        insights: &[
            "Measure satisfaction and service quality",
            "Track response times by category",
            "Surface recurring complaint themes",
        ],
        questions: &[
            "How satisfied are residents with our service?",
            "Which request categories take longest to resolve?",
            "Is service quality improving?",
        ],
    },
    PatternDef {
        id: "inventory_management",
        name: "Inventory Management Report",
        description: "Stock levels, turnover rates, and inventory optimization",
        keywords: &["inventory", "stock", "turnover", "level", "supply"],
        required: &[&[
            "inventory", "stock", "turnover", "level", "supply", "quantity", "count", "amount",
        ]],
        optional: &["date", "category", "location", "turnover", "supplier", "cost"],
        charts: &["bar", "line", "pie"],
        kpis: &["count", "turnover_rate", "efficiency"],
        threshold: 0.6,
        requirement: TypeRequirement::None,
        insights: &[
            "Monitor stock levels by location",
            "Identify slow-moving items",
            "Compare supplier costs",
        ],
        questions: &[
            "Which items are running low?",
            "What is our inventory turnover rate?",
            "Which suppliers cost the most?",
        ],
    },
    PatternDef {
        id: "project_status",
        name: "Project Status Report",
        description: "Project progress, milestones, and completion tracking",
        keywords: &["project", "status", "progress", "milestone", "completion"],
        required: &[&["status", "progress", "milestone", "completion", "phase", "stage", "task"]],
        optional: &["date", "project", "milestone", "completion", "manager", "budget"],
        charts: &["gantt", "bar", "pie"],
        kpis: &["percentage", "count", "timeline"],
        threshold: 0.6,
        requirement: TypeRequirement::None,
        insights: &[
            "Track progress toward milestones",
            "Identify projects at risk of delay",
            "Compare completion rates across managers",
        ],
        questions: &[
            "Which projects are behind schedule?",
            "How many milestones were completed this period?",
            "Which phases take the longest?",
        ],
    },
];
