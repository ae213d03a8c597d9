//! eclipath CLI
//!
//! Keeps an Eclipse project's `.classpath` in step with the dependencies
//! declared in `eclipath.toml`.

mod cli;
mod commands;
mod error;

use std::path::Path;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let project = match cli.project {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Some(cmd) => execute_command(&project, cmd),
        None => {
            println!("{} Eclipse classpath synchronizer", "eclipath".green().bold());
            println!();
            println!("Run {} for available commands.", "eclipath --help".cyan());
            Ok(())
        }
    }
}

/// Log to stderr; `--verbose` forces debug, otherwise `RUST_LOG` or warnings.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("{}: logging already initialised", "warning".yellow());
    }
    tracing::debug!("Verbose mode enabled");
}

fn execute_command(project: &Path, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Sync { args } => commands::run_sync(project, args),
        Commands::Check { args } => commands::run_check(project, args),
        Commands::Resolve { force_resolve } => commands::run_resolve(project, force_resolve),
        Commands::CheckClean => commands::run_check_clean(project),
        Commands::Clean => commands::run_clean(project),
        Commands::Refresh => commands::run_refresh(project),
        Commands::ConfigureWorkspace => commands::run_configure_workspace(project),
    }
}
