//! Automatic repair of broken column references.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::resolver::{ColumnNameResolver, MatchKind};
use super::validator::{Violation, validate_spec};
use crate::profile::DataProfile;
use crate::spec::{ReferenceLocation, ReportSpec};

/// One column reference that was rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRepair {
    pub location: ReferenceLocation,
    pub from: String,
    pub to: String,
    pub kind: MatchKind,
}

/// Result of [`repair_spec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairOutcome {
    /// The repaired specification.
    pub spec: ReportSpec,
    /// References that were rewritten, in violation order.
    pub repairs: Vec<ColumnRepair>,
    /// Violations no candidate column could resolve; left untouched in `spec`.
    pub unresolved: Vec<Violation>,
}

impl RepairOutcome {
    /// Whether the repaired spec is fully valid.
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Rewrite every invalid column reference that resolves to a profile column.
///
/// The input spec is not modified. References nothing resolves to stay in
/// place and are reported in [`RepairOutcome::unresolved`]. Repairing the
/// repaired spec again changes nothing.
pub fn repair_spec(spec: &ReportSpec, profile: &DataProfile) -> RepairOutcome {
    let resolver = ColumnNameResolver::from_profile(profile);
    let mut repaired = spec.clone();
    let mut repairs = Vec::new();
    let mut unresolved = Vec::new();

    for violation in validate_spec(spec, profile) {
        let Some(found) = resolver.resolve(&violation.column) else {
            warn!(column = %violation.column, "{}", violation);
            unresolved.push(violation);
            continue;
        };

        let Some(slot) = repaired.column_slot_mut(&violation.location) else {
            unresolved.push(violation);
            continue;
        };
        *slot = found.column.to_string();

        info!(
            from = %violation.column,
            to = found.column,
            kind = ?found.kind,
            "repaired column reference"
        );
        repairs.push(ColumnRepair {
            location: violation.location,
            from: violation.column,
            to: found.column.to_string(),
            kind: found.kind,
        });
    }

    RepairOutcome {
        spec: repaired,
        repairs,
        unresolved,
    }
}
