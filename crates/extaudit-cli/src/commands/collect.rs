//! Collect command implementation
//!
//! Checks host preconditions, inventories the profile and writes the
//! output envelope to the output channel.

use anyhow::{Context, Result};
use colored::Colorize;
use extaudit_core::{collect, JsonReader, PlistReader, ProfileLayout, Report};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::cli_args::ProfileArgs;
use crate::output::{render_report, OutputChannel};
use crate::preconditions;

/// Run the collect command
///
/// # Arguments
/// * `args` - Profile location and minimum versions
/// * `output` - Output channel file (stdout when `None`)
///
/// # Returns
/// Exit code: 0 on success; fatal errors are returned as `Err`
pub fn run(args: &ProfileArgs, output: Option<PathBuf>) -> Result<ExitCode> {
    let layout = args.layout()?;
    let requirements = args.requirements()?;

    let facts = preconditions::check_all(&layout, &requirements, &PlistReader::default())
        .context("precondition check failed")?;
    tracing::info!(
        "macOS {} with browser {} at {}",
        facts.os_version,
        facts.browser_version,
        layout.app_bundle.display()
    );

    let channel = OutputChannel::from_option(output);
    let report = write_inventory(&layout, &channel)?;

    if let OutputChannel::File(path) = &channel {
        print_summary(&report, &path.display().to_string());
    }
    Ok(ExitCode::SUCCESS)
}

/// Inventories `layout` and emits the envelope, without precondition checks.
pub fn write_inventory(layout: &ProfileLayout, channel: &OutputChannel) -> Result<Report> {
    let report = collect(layout, &JsonReader).with_context(|| {
        format!(
            "failed to inventory extensions in {}",
            layout.extensions_dir.display()
        )
    })?;
    let text = render_report(&report)?;
    channel.emit(&text)?;
    Ok(report)
}

fn print_summary(report: &Report, destination: &str) {
    println!(
        "{} {} extension(s), {} listed",
        "Collected".green().bold(),
        report.count,
        report.records.len()
    );
    for record in &report.records {
        println!("  {} {}", "->".green(), record.report_line());
    }
    if !report.diagnostics.is_empty() {
        println!(
            "{} {} diagnostic(s):",
            "WARNING".yellow().bold(),
            report.diagnostics.len()
        );
        for diagnostic in &report.diagnostics {
            println!("  {} {}", "!!".yellow(), diagnostic);
        }
    }
    println!("{} {}", "Wrote".dimmed(), destination.dimmed());
}
