//! Input parsing and raw dataset handling.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig};
pub use source::{Dataset, RawColumn, RawValue, SourceMetadata};
