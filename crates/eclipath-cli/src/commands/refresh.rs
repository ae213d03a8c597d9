//! Refresh command: notify the running IDE

use std::path::Path;

use colored::Colorize;

use eclipath_core::Session;

use crate::error::Result;

/// Run the refresh command
pub fn run_refresh(path: &Path) -> Result<()> {
    let session = Session::open(path)?;
    let client = session.manifest().refresh_client();
    let url = client.url(&session.project().name)?;
    println!("{} Requesting {}", "=>".blue().bold(), url.as_str().dimmed());
    super::sync::notify_ide(&session);
    Ok(())
}
