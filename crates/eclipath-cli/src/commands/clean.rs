//! Check-clean and clean command implementations

use std::path::Path;

use colored::Colorize;

use eclipath_core::{Session, TracingReporter};
use eclipath_fs::NormalizedPath;

use crate::error::Result;

/// Run the check-clean command
///
/// Lists library files in the project's library directories that no declared
/// dependency occupies.
pub fn run_check_clean(path: &Path) -> Result<()> {
    let session = Session::open(path)?;
    let stale = session.stale_files(&TracingReporter)?;

    if stale.is_empty() {
        println!("{} No unused library files.", "OK".green().bold());
        return Ok(());
    }

    println!("{} Unused library files:", "STALE".yellow().bold());
    for file in &stale {
        println!("   {} {}", "-".yellow(), display_relative(&session, file));
    }
    println!();
    println!("Run {} to delete them.", "eclipath clean".cyan());
    Ok(())
}

/// Run the clean command
pub fn run_clean(path: &Path) -> Result<()> {
    let session = Session::open(path)?;
    let report = session.clean(&TracingReporter)?;

    if report.removed.is_empty() && report.failed.is_empty() {
        println!("{} Nothing to clean.", "OK".green().bold());
        return Ok(());
    }

    for file in &report.removed {
        println!("   {} {}", "-".red(), display_relative(&session, file));
    }
    for file in &report.failed {
        println!(
            "   {} {} (could not delete)",
            "!".yellow(),
            display_relative(&session, file)
        );
    }
    println!(
        "{} Deleted {} files, {} directories.",
        "OK".green().bold(),
        report.removed.len(),
        report.removed_dirs.len()
    );
    Ok(())
}

fn display_relative(session: &Session, file: &NormalizedPath) -> String {
    file.relative_to(&session.project().root)
        .unwrap_or_else(|| file.to_string())
}
