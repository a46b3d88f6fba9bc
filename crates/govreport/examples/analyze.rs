//! Example: Profile a CSV export and suggest reports for it.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path>
//!
//! Example:
//!   cargo run --example analyze -- budget_fy24.csv

use std::env;
use std::path::Path;

use govreport::{Profiler, ReportTypeSuggester, repair_spec, template};

fn main() -> govreport::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path>");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("GovReport Profile: {}", path.display());
    println!("{}", separator);

    let report = Profiler::new().profile_file(path)?;

    println!("\n## Source");
    println!("  Format: {}", report.source.format);
    println!("  Rows: {}", report.source.row_count);
    println!("  Columns: {}", report.source.column_count);
    println!("  Strategy: {}", report.strategy.description());

    println!("\n## Columns");
    for column in report.profile.columns() {
        let stats = column.stats();
        print!(
            "  {:<30} {:<10} {:>5.1}% complete",
            column.name(),
            column.column_type(),
            stats.completeness() * 100.0
        );
        if let (Some(min), Some(max)) = (stats.min, stats.max) {
            print!("  range {} .. {}", min, max);
        }
        println!();
    }

    println!("\n## Suggested Reports");
    for suggestion in ReportTypeSuggester::new().suggest(&report.profile) {
        println!(
            "  {:.2}  {} ({})",
            suggestion.confidence, suggestion.name, suggestion.confidence_level
        );
    }

    let outcome = repair_spec(&template("budget_vs_actual")?, &report.profile);
    println!("\n## Budget vs Actual Template");
    for repair in &outcome.repairs {
        println!("  '{}' -> '{}'", repair.from, repair.to);
    }
    for violation in &outcome.unresolved {
        println!("  unresolved: {}", violation);
    }

    Ok(())
}
