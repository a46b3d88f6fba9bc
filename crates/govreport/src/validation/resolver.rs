//! Fuzzy matching of column references against available column names.

use serde::{Deserialize, Serialize};

use crate::profile::DataProfile;

/// Minimum target length for an abbreviation match.
const MIN_ABBREVIATION_LEN: usize = 3;

/// Which rule produced a match, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    CaseInsensitive,
    Substring,
    TokenOverlap,
    Abbreviation,
}

/// A resolved column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMatch<'a> {
    pub column: &'a str,
    pub kind: MatchKind,
}

/// Resolves possibly misspelled column references.
///
/// Rules are tried in order and the first candidate (in column order) that
/// satisfies a rule wins:
///
/// 1. exact name
/// 2. case-insensitive name
/// 3. either name contains the other, ignoring case
/// 4. the candidate contains any whitespace-separated word of the target
/// 5. the target is an in-order abbreviation of the candidate (`Dept` for
///    `Department`)
#[derive(Debug, Clone)]
pub struct ColumnNameResolver<'a> {
    candidates: Vec<&'a str>,
}

impl<'a> ColumnNameResolver<'a> {
    pub fn new(candidates: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            candidates: candidates.into_iter().collect(),
        }
    }

    /// Resolver over a profile's columns, in profile order.
    pub fn from_profile(profile: &'a DataProfile) -> Self {
        Self::new(profile.column_names())
    }

    /// Resolve `target`, or None when nothing is close enough.
    pub fn resolve(&self, target: &str) -> Option<ColumnMatch<'a>> {
        if target.trim().is_empty() {
            return None;
        }

        if let Some(column) = self.candidates.iter().find(|c| **c == target) {
            return Some(ColumnMatch {
                column: *column,
                kind: MatchKind::Exact,
            });
        }

        let target_lower = target.to_lowercase();
        let lowered: Vec<(&'a str, String)> = self
            .candidates
            .iter()
            .filter(|c| !c.trim().is_empty())
            .map(|c| (*c, c.to_lowercase()))
            .collect();

        let found = |kind: MatchKind, pred: &dyn Fn(&str) -> bool| {
            lowered
                .iter()
                .find(|(_, lower)| pred(lower.as_str()))
                .map(|(column, _)| ColumnMatch {
                    column: *column,
                    kind,
                })
        };

        let tokens: Vec<&str> = target_lower.split_whitespace().collect();

        found(MatchKind::CaseInsensitive, &|c: &str| c == target_lower)
            .or_else(|| {
                found(MatchKind::Substring, &|c: &str| {
                    c.contains(target_lower.as_str()) || target_lower.contains(c)
                })
            })
            .or_else(|| {
                found(MatchKind::TokenOverlap, &|c: &str| {
                    tokens.iter().any(|t| c.contains(*t))
                })
            })
            .or_else(|| {
                found(MatchKind::Abbreviation, &|c: &str| is_abbreviation(&target_lower, c))
            })
    }
}

/// Whether `target` abbreviates `candidate`: same first character and every
/// remaining character of `target` appears in `candidate` in order.
fn is_abbreviation(target: &str, candidate: &str) -> bool {
    let target: Vec<char> = target.chars().filter(|c| c.is_alphanumeric()).collect();
    if target.len() < MIN_ABBREVIATION_LEN {
        return false;
    }

    let mut candidate = candidate.chars().filter(|c| c.is_alphanumeric());
    if candidate.next() != Some(target[0]) {
        return false;
    }

    target[1..]
        .iter()
        .all(|wanted| candidate.by_ref().any(|c| c == *wanted))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> ColumnNameResolver<'static> {
        ColumnNameResolver::new(["Department", "Budget", "Actual Spend", "Date"])
    }

    #[test]
    fn test_exact_and_case_insensitive() {
        let r = resolver();
        assert_eq!(r.resolve("Budget").unwrap().kind, MatchKind::Exact);

        let m = r.resolve("budget").unwrap();
        assert_eq!(m.column, "Budget");
        assert_eq!(m.kind, MatchKind::CaseInsensitive);
    }

    #[test]
    fn test_substring_either_direction() {
        let r = resolver();
        let m = r.resolve("Total Budget").unwrap();
        assert_eq!(m.column, "Budget");
        assert_eq!(m.kind, MatchKind::Substring);

        assert_eq!(r.resolve("Actual").unwrap().column, "Actual Spend");
    }

    #[test]
    fn test_token_overlap() {
        let m = resolver().resolve("spend amount").unwrap();
        assert_eq!(m.column, "Actual Spend");
        assert_eq!(m.kind, MatchKind::TokenOverlap);
    }

    #[test]
    fn test_abbreviation() {
        let r = ColumnNameResolver::new(["Department", "Budget"]);
        let m = r.resolve("Dept").unwrap();
        assert_eq!(m.column, "Department");
        assert_eq!(m.kind, MatchKind::Abbreviation);

        assert!(r.resolve("Dp").is_none());
        assert!(r.resolve("Bdx").is_none());
    }

    #[test]
    fn test_no_match() {
        let r = ColumnNameResolver::new(["Department", "Budget"]);
        assert!(r.resolve("xyz123").is_none());
        assert!(r.resolve("   ").is_none());
        assert!(r.resolve("").is_none());
    }

    #[test]
    fn test_first_candidate_wins() {
        let r = ColumnNameResolver::new(["Budget 2023", "Budget 2024"]);
        assert_eq!(r.resolve("budget").unwrap().column, "Budget 2023");
    }
}
