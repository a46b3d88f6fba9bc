//! CLI argument definitions using clap.

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// GovReport: profile government datasets and plan reports for them
#[derive(Parser)]
#[command(name = "govreport")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Infer column types and statistics for a data file
    Profile {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Maximum rows of samples to keep (overrides MAX_SAMPLE_ROWS)
        #[arg(long, value_name = "ROWS")]
        budget: Option<usize>,

        /// Field delimiter (auto-detected when omitted)
        #[arg(short, long)]
        delimiter: Option<String>,
    },

    /// Rank report types by how well they fit a data file
    Suggest {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Custom report pattern catalog (JSON)
        #[arg(long, value_name = "CATALOG")]
        catalog: Option<PathBuf>,
    },

    /// Check a report spec's column references against a data file
    #[command(group(ArgGroup::new("source").required(true).args(["spec", "template"])))]
    Validate {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Report spec to check (JSON)
        #[arg(short, long)]
        spec: Option<PathBuf>,

        /// Built-in template to check instead of a spec file
        #[arg(short, long)]
        template: Option<String>,

        /// Rewrite broken references to the closest column
        #[arg(long)]
        repair: bool,

        /// Where to write the repaired spec (default: stdout)
        #[arg(short, long, requires = "repair")]
        output: Option<PathBuf>,
    },

    /// Draft a report spec from the shape of a data file
    Plan {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// What the report is for; becomes part of the title
        #[arg(short, long, default_value = "")]
        description: String,

        /// Use a built-in template when one matches
        #[arg(short, long)]
        template: Option<String>,

        /// Where to write the spec (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the built-in report templates
    Templates {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
