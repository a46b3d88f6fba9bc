//! Report spec validation against a data profile and column repair.

mod repair;
mod resolver;
mod validator;

pub use repair::{ColumnRepair, RepairOutcome, repair_spec};
pub use resolver::{ColumnMatch, ColumnNameResolver, MatchKind};
pub use validator::{Violation, validate_spec, validation_messages};
