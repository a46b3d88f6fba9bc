//! Validate command - check (and optionally repair) a report spec.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use govreport::{ReportSpec, repair_spec, template, validate_spec};

use super::{CommandResult, profile_file, write_json};

pub fn run(
    file: PathBuf,
    spec: Option<PathBuf>,
    template_id: Option<String>,
    repair: bool,
    output: Option<PathBuf>,
) -> CommandResult {
    let spec = match (spec, template_id) {
        (Some(path), _) => ReportSpec::from_json_str(&fs::read_to_string(&path)?)?,
        (None, Some(id)) => template(&id)?,
        (None, None) => return Err("either --spec or --template is required".into()),
    };

    let report = profile_file(&file, None, None)?;

    if !repair {
        let violations = validate_spec(&spec, &report.profile);
        if violations.is_empty() {
            println!(
                "{} every column in '{}' exists in {}",
                "OK".green().bold(),
                spec.title,
                report.source.file
            );
            return Ok(());
        }

        for violation in &violations {
            println!("{} {}", "x".red().bold(), violation);
        }
        return Err(format!("{} invalid column reference(s)", violations.len()).into());
    }

    let outcome = repair_spec(&spec, &report.profile);

    // Change-log goes to stderr; stdout carries only the repaired spec
    for change in &outcome.repairs {
        eprintln!(
            "{} '{}' -> '{}' ({:?})",
            "repaired".green().bold(),
            change.from,
            change.to,
            change.kind
        );
    }
    for violation in &outcome.unresolved {
        eprintln!("{} {}", "unresolved".red().bold(), violation);
    }

    write_json(&outcome.spec, output.as_ref())?;

    if outcome.is_clean() {
        Ok(())
    } else {
        Err(format!(
            "{} column reference(s) could not be repaired",
            outcome.unresolved.len()
        )
        .into())
    }
}
