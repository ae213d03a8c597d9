//! Filesystem abstraction for eclipath
//!
//! Provides forward-slash path handling, atomic writes, copy-if-newer for
//! library attachments, and format-agnostic manifest loading.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::ProjectPath;
pub use error::{Error, Result};
pub use io::CopyOutcome;
pub use path::NormalizedPath;
