//! Sync and check command implementations
//!
//! Both reconcile `.classpath` with the manifest. `sync` removes entries no
//! dependency declares; `check` only adds and replaces.

use std::path::Path;

use colored::Colorize;

use eclipath_core::{ReconcileReport, RunOptions, Session, SyncMode, TracingReporter};

use crate::cli::ReconcileArgs;
use crate::error::{CliError, Result};

/// Run the sync command
pub fn run_sync(path: &Path, args: ReconcileArgs) -> Result<()> {
    reconcile(path, SyncMode::Full, args)
}

/// Run the check command
pub fn run_check(path: &Path, args: ReconcileArgs) -> Result<()> {
    reconcile(path, SyncMode::Additive, args)
}

fn reconcile(path: &Path, mode: SyncMode, args: ReconcileArgs) -> Result<()> {
    let session = Session::open(path)?;
    if !args.json {
        let verb = match mode {
            SyncMode::Full => "Synchronizing",
            SyncMode::Additive => "Checking",
        };
        println!(
            "{} {} classpath of {}...",
            "=>".blue().bold(),
            verb,
            session.project().name.cyan()
        );
    }

    let options = RunOptions {
        mode,
        dry_run: args.dry_run,
        force_resolve: args.force_resolve,
    };
    let report = session.sync(options, &TracingReporter)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, args.dry_run);
    }

    if mode == SyncMode::Full && report.written && session.manifest().refresh.enabled {
        notify_ide(&session);
    }

    if args.strict && !report.is_complete() {
        return Err(CliError::Incomplete {
            count: report.failures.len() + report.skipped.len(),
        });
    }
    Ok(())
}

fn print_report(report: &ReconcileReport, dry_run: bool) {
    let actions = report.actions(dry_run);
    if actions.is_empty() {
        println!("{} Classpath is up to date. No changes needed.", "OK".green().bold());
    } else if dry_run {
        println!("{} Would make the following changes:", "DRY-RUN".yellow().bold());
        for action in &actions {
            println!("   {} {}", "~".yellow(), action);
        }
    } else {
        println!("{} Classpath updated:", "OK".green().bold());
        for action in &actions {
            println!("   {} {}", "+".green(), action);
        }
    }

    if !report.failures.is_empty() {
        println!();
        println!("{} Not resolved:", "MISSING".red().bold());
        for failure in &report.failures {
            println!("   {} {}", "[N]".red(), failure);
        }
    }
    if !report.skipped.is_empty() {
        println!();
        println!("{} Skipped:", "WARN".yellow().bold());
        for skipped in &report.skipped {
            println!("   {} {}: {}", "!".yellow(), skipped.coordinate, skipped.reason);
        }
    }
}

/// Refresh failures never fail the command.
pub(crate) fn notify_ide(session: &Session) {
    match session.refresh() {
        Ok(()) => println!(
            "{} Refreshed {} in the IDE",
            "OK".green().bold(),
            session.project().name.cyan()
        ),
        Err(e) => {
            tracing::warn!(error = %e, "IDE refresh failed");
            println!("{} IDE refresh failed: {}", "WARN".yellow().bold(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eclipath_test_utils::TestProject;

    fn project_with(dependencies: &str) -> TestProject {
        let project = TestProject::new();
        project.write_manifest(&format!(
            "{}\n[classpath]\npolicy = \"project\"\nsources = false\njavadoc = false\n\n{}",
            project.repository_toml(),
            dependencies
        ));
        project
    }

    const MISSING: &str = "[[dependencies]]\ngroup = \"org.example\"\nartifact = \"missing\"\nversion = \"1.0\"\n";

    #[test]
    fn sync_without_manifest_fails() {
        let project = TestProject::new();
        assert!(run_sync(&project.root(), ReconcileArgs::default()).is_err());
    }

    #[test]
    fn missing_dependency_only_fails_when_strict() {
        let project = project_with(MISSING);

        assert!(run_sync(&project.root(), ReconcileArgs::default()).is_ok());
        let strict = ReconcileArgs {
            strict: true,
            ..ReconcileArgs::default()
        };
        assert!(matches!(
            run_sync(&project.root(), strict),
            Err(CliError::Incomplete { count: 1 })
        ));
    }

    #[test]
    fn check_keeps_undeclared_entries() {
        let project = project_with("");
        project.write_classpath(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<classpath>\n\t<classpathentry kind=\"lib\" path=\"lib/other-1.0.jar\"/>\n</classpath>\n",
        );

        run_check(&project.root(), ReconcileArgs::default()).unwrap();
        project.assert_file_contains(".classpath", "lib/other-1.0.jar");

        run_sync(&project.root(), ReconcileArgs::default()).unwrap();
        let classpath = project.read_classpath();
        assert!(!classpath.contains("lib/other-1.0.jar"), "{}", classpath);
    }
}
