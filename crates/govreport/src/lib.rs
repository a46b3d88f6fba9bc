//! GovReport: column profiling and report planning for government datasets.
//!
//! GovReport infers the semantic type of every column in a tabular dataset,
//! builds a profile of the data, and uses that profile to check declarative
//! report specifications, repair broken column references and suggest which
//! kind of report fits the data.
//!
//! # Core Principles
//!
//! - **Never fails on ambiguity**: uncertain columns are strings, unknown
//!   column references are violations, not errors
//! - **Non-destructive**: repair returns a new spec plus a change-log
//! - **Deterministic**: the same data always yields the same profile, ranking
//!   and plan
//!
//! # Example
//!
//! ```no_run
//! use govreport::{Profiler, ReportTypeSuggester, repair_spec, template};
//!
//! let report = Profiler::new().profile_file("budget.csv").unwrap();
//! for suggestion in ReportTypeSuggester::new().suggest(&report.profile) {
//!     println!("{} ({:.2})", suggestion.name, suggestion.confidence);
//! }
//!
//! let spec = template("budget_vs_actual").unwrap();
//! let outcome = repair_spec(&spec, &report.profile);
//! println!("Unresolved references: {}", outcome.unresolved.len());
//! ```

pub mod config;
pub mod error;
pub mod inference;
pub mod input;
pub mod planner;
pub mod profile;
pub mod sampling;
pub mod spec;
pub mod suggestion;
pub mod validation;

mod profiler;

pub use crate::profiler::{ProfileReport, Profiler, ProfilerConfig};
pub use config::{CostWarning, Environment, ProcessingConfig, ProcessingStrategy};
pub use error::{GovReportError, Result};
pub use inference::ColumnTypeClassifier;
pub use input::{Dataset, Parser, RawValue, SourceMetadata};
pub use planner::{ReportKind, TemplatePlanner};
pub use profile::{ColumnProfile, ColumnStats, ColumnType, DataProfile};
pub use spec::{ReportSpec, builtin_templates, template};
pub use suggestion::{PatternCatalog, ReportSuggestion, ReportTypeSuggester};
pub use validation::{ColumnNameResolver, RepairOutcome, Violation, repair_spec, validate_spec};
