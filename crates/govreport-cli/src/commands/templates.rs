//! Templates command - list built-in report templates.

use std::collections::HashSet;

use colored::Colorize;
use govreport::builtin_templates;

use super::{CommandResult, write_json};

pub fn run(json: bool) -> CommandResult {
    let templates = builtin_templates();

    if json {
        return write_json(&templates, None);
    }

    for (id, spec) in &templates {
        println!("{} {}", id.cyan().bold(), spec.title.white());
        if let Some(description) = &spec.description {
            println!("  {}", description.dimmed());
        }

        let mut columns: Vec<&str> = spec
            .column_references()
            .into_iter()
            .map(|(_, column)| column)
            .collect();
        let mut seen = HashSet::new();
        columns.retain(|c| seen.insert(*c));
        println!("  columns: {}", columns.join(", "));
    }

    Ok(())
}
