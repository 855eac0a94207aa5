//! Doctor command implementation
//!
//! Runs the host precondition checks without collecting and prints a
//! checklist. Unlike `collect`, every check runs even after one fails.

use anyhow::Result;
use colored::Colorize;
use extaudit_core::{PlistReader, ProfileLayout, StructuredReader};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use crate::cli_args::ProfileArgs;
use crate::preconditions::{self, Requirements, SYSTEM_VERSION_PLIST};

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: &'static str,
    pub ok: bool,
    pub detail: String,
}

impl CheckResult {
    fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            ok: true,
            detail: detail.into(),
        }
    }

    fn fail(name: &'static str, detail: impl ToString) -> Self {
        Self {
            name,
            ok: false,
            detail: detail.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DoctorOutput<'a> {
    success: bool,
    version: &'static str,
    checks: &'a [CheckResult],
}

/// Run the doctor command
///
/// # Returns
/// Exit code: 0 if all checks pass, 1 if any fail
pub fn run(args: &ProfileArgs, json: bool) -> Result<ExitCode> {
    let layout = args.layout()?;
    let requirements = args.requirements()?;

    let checks = run_checks(
        &layout,
        &requirements,
        &PlistReader::default(),
        Path::new(SYSTEM_VERSION_PLIST),
        preconditions::current_user_is_root(),
    );
    let all_ok = checks.iter().all(|c| c.ok);

    if json {
        let output = DoctorOutput {
            success: all_ok,
            version: env!("CARGO_PKG_VERSION"),
            checks: &checks,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_checklist(&layout, &checks, all_ok);
    }

    Ok(if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Evaluates every precondition plus the extensions directory.
pub fn run_checks(
    layout: &ProfileLayout,
    requirements: &Requirements,
    plist: &dyn StructuredReader,
    system_version_plist: &Path,
    is_root: bool,
) -> Vec<CheckResult> {
    let mut checks = Vec::new();

    let os = preconditions::read_os_version(plist, system_version_plist)
        .and_then(|found| preconditions::check_os_version(&found, &requirements.min_os_version));
    checks.push(match os {
        Ok(version) => CheckResult::pass(
            "os_version",
            format!("macOS {} (minimum {})", version, requirements.min_os_version),
        ),
        Err(e) => CheckResult::fail("os_version", e),
    });

    checks.push(match preconditions::check_not_elevated(is_root) {
        Ok(()) => CheckResult::pass("privileges", "running as a regular user"),
        Err(e) => CheckResult::fail("privileges", e),
    });

    let browser = preconditions::read_browser_version(layout, plist).and_then(|found| {
        preconditions::check_browser_version(found.as_deref(), &requirements.min_browser_version)
    });
    checks.push(match browser {
        Ok(version) => CheckResult::pass(
            "browser_version",
            format!(
                "browser {} (minimum {})",
                version, requirements.min_browser_version
            ),
        ),
        Err(e) => CheckResult::fail("browser_version", e),
    });

    checks.push(if layout.extensions_dir.is_dir() {
        CheckResult::pass(
            "extensions_dir",
            layout.extensions_dir.display().to_string(),
        )
    } else {
        CheckResult::fail(
            "extensions_dir",
            format!("directory not found: {}", layout.extensions_dir.display()),
        )
    });

    checks
}

fn print_checklist(layout: &ProfileLayout, checks: &[CheckResult], all_ok: bool) {
    println!("{}", "extaudit Doctor".cyan().bold());
    println!("{}", "===============".cyan());
    println!();

    println!("{}", "Versions:".bold());
    println!(
        "  {} extaudit-cli v{}",
        "->".green(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("{}", "Profile:".bold());
    println!("  {} app      {}", "->".green(), layout.app_bundle.display());
    println!("  {} profile  {}", "->".green(), layout.profile_dir.display());
    println!();

    println!("{}", "Checks:".bold());
    for check in checks {
        if check.ok {
            println!("  {} {}: {}", "ok".green(), check.name, check.detail);
        } else {
            println!("  {} {}: {}", "!!".red(), check.name, check.detail);
        }
    }
    println!();

    if all_ok {
        println!("{} All checks passed!", "SUCCESS".green().bold());
    } else {
        println!(
            "{} Some checks failed. See above for details.",
            "WARNING".yellow().bold()
        );
    }
}
