//! Report-type suggestions from a data profile.
//!
//! A [`PatternCatalog`] describes report types by the column names that
//! indicate them; [`ReportTypeSuggester`] scores a profile against every
//! pattern and ranks the ones that pass their threshold.

mod catalog;
mod suggester;

pub use catalog::{PatternCatalog, ReportPattern, TypeRequirement};
pub use suggester::{
    ConfidenceLevel, DataQuality, DataSummary, ReportSuggestion, ReportTypeSuggester,
    TemplateSuggestions, assess_quality, recommendations,
};
