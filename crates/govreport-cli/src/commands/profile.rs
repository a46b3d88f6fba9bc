//! Profile command - infer column types and statistics.

use std::path::PathBuf;

use colored::Colorize;
use govreport::ColumnType;
use serde_json::json;

use super::{CommandResult, profile_file, write_json};

pub fn run(
    file: PathBuf,
    json: bool,
    budget: Option<usize>,
    delimiter: Option<String>,
    verbose: bool,
) -> CommandResult {
    let report = profile_file(&file, budget, delimiter.as_deref())?;
    let view = report.budget_view();

    if json {
        return write_json(
            &json!({
                "source": report.source,
                "profile": view,
                "strategy": report.strategy,
                "ai_sample_size": report.ai_sample_size,
                "cost": report.cost,
            }),
            None,
        );
    }

    println!(
        "{} {} ({} rows, {} columns, {})",
        "Profiled".cyan().bold(),
        report.source.file.white(),
        report.source.row_count,
        report.source.column_count,
        report.source.format
    );
    println!();

    for column in view.columns() {
        let stats = column.stats();
        let kind = column.column_type().to_string();
        let kind = match column.column_type() {
            ColumnType::String => kind.normal(),
            ColumnType::Date => kind.blue(),
            ColumnType::Boolean => kind.magenta(),
            _ => kind.green(),
        };
        print!(
            "  {:24} {:10} {:>6.1}% complete",
            column.name(),
            kind,
            stats.completeness() * 100.0
        );
        if let (Some(min), Some(mean), Some(max)) = (stats.min, stats.mean, stats.max) {
            print!("  min {} / mean {:.2} / max {}", min, mean, max);
        }
        println!();

        if verbose && !column.sample_values().is_empty() {
            println!("  {:24} {}", "", column.sample_values().join(", ").dimmed());
        }
    }

    println!();
    println!(
        "Strategy: {} ({} rows in budget)",
        report.strategy.description(),
        report.ai_sample_size
    );

    if report.cost.has_warnings {
        println!();
        for warning in &report.cost.warnings {
            println!("{} {}", "warning:".yellow().bold(), warning);
        }
        for rec in &report.cost.recommendations {
            println!("  {} {}", "->".cyan(), rec);
        }
    }

    Ok(())
}
