//! GovReport CLI - profile datasets and plan reports from the terminal.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use dotenv::dotenv;

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so JSON written to stdout stays parseable.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    // Load GOVREPORT_ENV, MAX_SAMPLE_ROWS etc. from .env before reading config
    dotenv().ok();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Profile {
            file,
            json,
            budget,
            delimiter,
        } => commands::profile::run(file, json, budget, delimiter, cli.verbose),

        Commands::Suggest {
            file,
            json,
            catalog,
        } => commands::suggest::run(file, json, catalog),

        Commands::Validate {
            file,
            spec,
            template,
            repair,
            output,
        } => commands::validate::run(file, spec, template, repair, output),

        Commands::Plan {
            file,
            description,
            template,
            output,
        } => commands::plan::run(file, description, template, output),

        Commands::Templates { json } => commands::templates::run(json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
