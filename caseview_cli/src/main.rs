//! caseview CLI
//!
//! Scans Rust sources for enums annotated with `#[with_switch_case_view]`, or
//! named with `--type`, and prints the generated switch-case views. Diagnostics
//! go to stderr as `path:line:column: severity: message`.

mod args;
mod error;
mod format;
mod scan;
mod session;

use std::collections::BTreeSet;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use itertools::Itertools;
use rayon::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use args::Args;
use error::CliError;
use session::FileReport;

/// Runs the generator over every input.
///
/// This function:
/// 1. Parses command-line arguments and initializes logging
/// 2. Builds the generator configuration
/// 3. Processes the input files in parallel
/// 4. Reports diagnostics and writes the generated code, through rustfmt
///    unless `--raw`
fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_thread_ids(true)
        .init();

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .map_err(CliError::from)?;
    }

    let config = args.to_config().map_err(CliError::from)?;
    let files = scan::discover(&args.inputs)?;
    info!("Processing {} file(s)", files.len());

    let results = files
        .par_iter()
        .map(|path| session::process_file(path, &config, &args.types))
        .collect::<Vec<_>>();

    let mut errors = 0;
    let mut warnings = 0;
    let mut reports = Vec::new();
    let mut stderr = std::io::stderr().lock();
    for result in results {
        match result {
            Ok(report) => {
                for line in &report.diagnostics {
                    writeln!(stderr, "{line}")?;
                }
                errors += report.errors;
                warnings += report.warnings;
                reports.push(report);
            }
            Err(e) => {
                writeln!(stderr, "{e}")?;
                errors += 1;
            }
        }
    }

    let found: BTreeSet<&str> = reports
        .iter()
        .flat_map(|r| r.selected.iter().map(String::as_str))
        .collect();
    for missing in args.types.iter().filter(|t| !found.contains(t.as_str())).unique() {
        writeln!(stderr, "caseview: warning: no declaration named `{missing}` in the inputs")?;
        warnings += 1;
    }

    let mut generated = reports.iter().flat_map(FileReport::render).join("\n\n");
    if !args.raw && !generated.is_empty() {
        generated = format::format_source(&generated);
    }
    let generated = generated.trim_end();
    match &args.output {
        Some(path) => std::fs::write(path, format!("{generated}\n")).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        })?,
        None if !generated.is_empty() => println!("{generated}"),
        None => {}
    }

    info!(
        "Generated {} view(s): {errors} error(s), {warnings} warning(s)",
        reports.iter().map(|r| r.generated.len()).sum::<usize>()
    );

    if errors > 0 || (args.deny_warnings && warnings > 0) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
