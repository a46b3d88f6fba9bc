//! Column and dataset profiles produced by type inference.

mod column;
mod data;
mod types;

pub use column::{ColumnProfile, ColumnStats};
pub use data::DataProfile;
pub use types::ColumnType;
