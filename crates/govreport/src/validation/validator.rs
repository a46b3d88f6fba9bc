//! Checks that a report specification only references existing columns.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::profile::DataProfile;
use crate::spec::{ReferenceLocation, ReportSpec};

/// A column reference that names no column of the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub location: ReferenceLocation,
    pub column: String,
}

impl Violation {
    pub fn new(location: ReferenceLocation, column: impl Into<String>) -> Self {
        Self {
            location,
            column: column.into(),
        }
    }

    /// Human-readable description of the violation.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            ReferenceLocation::Kpi { label, .. } => {
                write!(f, "KPI '{}' references non-existent column '{}'", label, self.column)
            }
            ReferenceLocation::ChartAxis { title, .. } => write!(
                f,
                "Chart '{}' references non-existent x-axis column '{}'",
                title, self.column
            ),
            ReferenceLocation::ChartSeries { title, label, .. } => write!(
                f,
                "Chart '{}' series '{}' references non-existent column '{}'",
                title, label, self.column
            ),
            ReferenceLocation::TableColumn { title, .. } => write!(
                f,
                "Table '{}' references non-existent column '{}'",
                title, self.column
            ),
        }
    }
}

/// Validate every column reference of `spec` against `profile`.
///
/// Violations come out in reference order: KPIs, then charts (x axis before
/// series), then tables. An empty result means the spec is valid.
pub fn validate_spec(spec: &ReportSpec, profile: &DataProfile) -> Vec<Violation> {
    let violations: Vec<Violation> = spec
        .column_references()
        .into_iter()
        .filter(|(_, column)| !profile.contains_column(column))
        .map(|(location, column)| Violation::new(location, column))
        .collect();

    debug!(
        report = %spec.title,
        violations = violations.len(),
        "validated report spec"
    );
    violations
}

/// Violations rendered as messages.
pub fn validation_messages(spec: &ReportSpec, profile: &DataProfile) -> Vec<String> {
    validate_spec(spec, profile)
        .iter()
        .map(Violation::message)
        .collect()
}
