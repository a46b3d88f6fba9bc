//! Plan command - draft a report spec from a data file.

use std::path::PathBuf;

use colored::Colorize;
use govreport::{TemplatePlanner, repair_spec};

use super::{CommandResult, profile_file, write_json};

pub fn run(
    file: PathBuf,
    description: String,
    template: Option<String>,
    output: Option<PathBuf>,
) -> CommandResult {
    let report = profile_file(&file, None, None)?;
    let spec = TemplatePlanner::new().plan(&report.profile, &description, template.as_deref());

    // Templates name idealized columns; point them at the real ones
    let outcome = repair_spec(&spec, &report.profile);
    for violation in &outcome.unresolved {
        eprintln!("{} {}", "warning:".yellow().bold(), violation);
    }

    eprintln!(
        "{} {} ({} KPIs, {} charts, {} tables)",
        "Planned".cyan().bold(),
        outcome.spec.title.white(),
        outcome.spec.kpis.len(),
        outcome.spec.charts.len(),
        outcome.spec.tables.len()
    );

    write_json(&outcome.spec, output.as_ref())
}
