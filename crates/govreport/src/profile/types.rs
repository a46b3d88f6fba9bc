//! Core type definitions for column profiles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Inferred semantic type for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Text/categorical values.
    #[default]
    String,
    /// Plain numbers, optionally with thousands separators.
    Number,
    /// Dollar amounts (`$1,200.50`).
    Currency,
    /// Percentages (`-4.5%`).
    Percent,
    /// Calendar dates.
    Date,
    /// Native boolean values.
    Boolean,
}

impl ColumnType {
    /// All types, in declaration order.
    pub const ALL: [ColumnType; 6] = [
        ColumnType::String,
        ColumnType::Number,
        ColumnType::Currency,
        ColumnType::Percent,
        ColumnType::Date,
        ColumnType::Boolean,
    ];

    /// Returns true for types that carry a measurable quantity.
    pub fn is_quantitative(&self) -> bool {
        matches!(
            self,
            ColumnType::Number | ColumnType::Currency | ColumnType::Percent
        )
    }

    /// Wire name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Number => "number",
            ColumnType::Currency => "currency",
            ColumnType::Percent => "percent",
            ColumnType::Date => "date",
            ColumnType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown column type '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantitative() {
        assert!(ColumnType::Currency.is_quantitative());
        assert!(ColumnType::Percent.is_quantitative());
        assert!(!ColumnType::Date.is_quantitative());
        assert!(!ColumnType::String.is_quantitative());
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("Currency".parse::<ColumnType>().unwrap(), ColumnType::Currency);
        assert_eq!(ColumnType::Percent.to_string(), "percent");
        assert!("money".parse::<ColumnType>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ColumnType::Date).unwrap();
        assert_eq!(json, "\"date\"");
    }
}
