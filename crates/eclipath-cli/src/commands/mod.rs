//! Command implementations for eclipath-cli

pub mod clean;
pub mod refresh;
pub mod resolve;
pub mod sync;
pub mod workspace;

pub use clean::{run_check_clean, run_clean};
pub use refresh::run_refresh;
pub use resolve::run_resolve;
pub use sync::{run_check, run_sync};
pub use workspace::run_configure_workspace;
