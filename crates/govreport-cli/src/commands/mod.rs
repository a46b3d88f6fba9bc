//! CLI command implementations.

pub mod plan;
pub mod profile;
pub mod suggest;
pub mod templates;
pub mod validate;

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use govreport::input::ParserConfig;
use govreport::{ProcessingConfig, ProfileReport, Profiler, ProfilerConfig};
use serde::Serialize;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Profile `file` with limits taken from the environment.
pub fn profile_file(
    file: &Path,
    budget: Option<usize>,
    delimiter: Option<&str>,
) -> Result<ProfileReport, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let mut processing = ProcessingConfig::from_env()?;
    if let Some(rows) = budget {
        processing = processing.with_max_sample_rows(rows);
    }

    let mut parser = ParserConfig::default();
    if let Some(d) = delimiter {
        parser = parser.with_delimiter_str(d)?;
    }

    let config = ProfilerConfig {
        parser,
        processing,
        ..ProfilerConfig::default()
    };

    Ok(Profiler::with_config(config).profile_file(file)?)
}

/// Pretty-print `value` as JSON to `output`, or to stdout.
pub fn write_json<T: Serialize>(value: &T, output: Option<&PathBuf>) -> CommandResult {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            fs::write(path, json + "\n")?;
            eprintln!(
                "{} {}",
                "Saved to".green().bold(),
                path.display().to_string().white()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}
