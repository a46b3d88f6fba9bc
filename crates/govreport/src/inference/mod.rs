//! Column type inference.

mod classifier;

pub use classifier::{ClassifierConfig, ColumnTypeClassifier};
