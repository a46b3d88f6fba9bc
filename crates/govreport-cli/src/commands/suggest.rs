//! Suggest command - rank report types for a data file.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use govreport::suggestion::ConfidenceLevel;
use govreport::{PatternCatalog, ReportTypeSuggester};

use super::{CommandResult, profile_file, write_json};

pub fn run(file: PathBuf, json: bool, catalog: Option<PathBuf>) -> CommandResult {
    let report = profile_file(&file, None, None)?;

    let suggester = match catalog {
        Some(path) => ReportTypeSuggester::with_catalog(Arc::new(PatternCatalog::from_file(path)?)),
        None => ReportTypeSuggester::new(),
    };
    let result = suggester.template_suggestions(&report.profile);

    if json {
        return write_json(&result, None);
    }

    let summary = &result.data_summary;
    println!(
        "{} {} ({} rows, {} columns)",
        "Suggestions for".cyan().bold(),
        report.source.file.white(),
        summary.total_rows,
        summary.total_columns
    );
    println!();

    if result.report_suggestions.is_empty() {
        println!("{}", "No report type fits this data yet.".yellow());
    }

    for (rank, suggestion) in result.report_suggestions.iter().enumerate() {
        let level = suggestion.confidence_level.label();
        let level = match suggestion.confidence_level {
            ConfidenceLevel::Excellent | ConfidenceLevel::VeryGood | ConfidenceLevel::Good => {
                level.green()
            }
            ConfidenceLevel::Fair => level.yellow(),
            ConfidenceLevel::Weak => level.red(),
        };
        println!(
            "{}. {} {:.0}% {}",
            rank + 1,
            suggestion.name.white().bold(),
            suggestion.confidence * 100.0,
            level
        );
        println!("   {}", suggestion.description.dimmed());
        if !suggestion.recommended_charts.is_empty() {
            println!("   charts: {}", suggestion.recommended_charts.join(", "));
        }
        for question in suggestion.sample_questions.iter().take(2) {
            println!("   ? {}", question);
        }
    }

    if !result.recommendations.is_empty() {
        println!();
        println!("{}", "Recommendations:".yellow().bold());
        for rec in &result.recommendations {
            println!("  - {}", rec);
        }
    }

    Ok(())
}
