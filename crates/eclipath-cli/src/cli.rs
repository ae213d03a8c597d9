//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// eclipath - Keep an Eclipse .classpath in step with declared dependencies
#[derive(Parser, Debug)]
#[command(name = "eclipath")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project directory (the nearest parent with a .project is used)
    #[arg(short, long, global = true, env = "ECLIPATH_PROJECT")]
    pub project: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Flags shared by `sync` and `check`
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileArgs {
    /// Preview changes without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Exit non-zero when a dependency could not be added
    #[arg(long)]
    pub strict: bool,

    /// Retry artifacts previously marked as not available
    #[arg(long)]
    pub force_resolve: bool,

    /// Output the report as JSON for scripting
    #[arg(long)]
    pub json: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Reconcile .classpath with the manifest, removing undeclared libraries
    ///
    /// Examples:
    ///   eclipath sync                # Update .classpath and copy libraries
    ///   eclipath sync --dry-run      # Show what would change
    ///   eclipath sync --strict       # Fail if a dependency is missing
    Sync {
        #[command(flatten)]
        args: ReconcileArgs,
    },

    /// Add and update declared libraries, leaving other entries alone
    Check {
        #[command(flatten)]
        args: ReconcileArgs,
    },

    /// Print which dependencies and attachments resolve
    Resolve {
        /// Retry artifacts previously marked as not available
        #[arg(long)]
        force_resolve: bool,
    },

    /// List library files no declared dependency occupies
    CheckClean,

    /// Delete library files no declared dependency occupies
    Clean,

    /// Ask the running IDE to refresh the project
    Refresh,

    /// Point the workspace classpath variable at the local repository
    ConfigureWorkspace,
}
