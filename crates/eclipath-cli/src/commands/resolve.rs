//! Resolve command: dependency report without touching the project

use std::path::Path;

use colored::Colorize;

use eclipath_core::{Session, TracingReporter};

use crate::error::Result;

/// Run the resolve command
pub fn run_resolve(path: &Path, force_resolve: bool) -> Result<()> {
    let session = Session::open(path)?;
    println!(
        "{} Resolving dependencies of {}...",
        "=>".blue().bold(),
        session.project().name.cyan()
    );

    let report = session.resolution_report(force_resolve, &TracingReporter)?;
    if report.is_empty() {
        println!("{} No dependencies declared.", "OK".green().bold());
        return Ok(());
    }

    print!("{}", report.render());
    let unresolved = report.unresolved().count();
    if unresolved == 0 {
        println!("{} All dependencies resolved.", "OK".green().bold());
    } else {
        println!(
            "{} {} dependencies not resolved.",
            "MISSING".yellow().bold(),
            unresolved
        );
    }
    Ok(())
}
