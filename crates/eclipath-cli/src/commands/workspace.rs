//! Configure-workspace command implementation

use std::path::Path;

use colored::Colorize;

use eclipath_core::Session;

use crate::error::Result;

/// Run the configure-workspace command
///
/// Writes the shared-repository classpath variable into the workspace
/// JDT preferences.
pub fn run_configure_workspace(path: &Path) -> Result<()> {
    let session = Session::open(path)?;
    let variable = &session.manifest().repository.variable;

    if session.configure_workspace()? {
        println!(
            "{} Set {} to {}",
            "OK".green().bold(),
            variable.cyan(),
            session.local_repository().display()
        );
    } else {
        println!(
            "{} {} already points at {}",
            "OK".green().bold(),
            variable.cyan(),
            session.local_repository().display()
        );
    }
    Ok(())
}
