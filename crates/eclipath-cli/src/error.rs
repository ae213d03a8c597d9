//! Error types for eclipath-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from eclipath-core
    #[error(transparent)]
    Core(#[from] eclipath_core::Error),

    /// Error from eclipath-fs
    #[error(transparent)]
    Fs(#[from] eclipath_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON output failed
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Dependencies left out of the descriptor under `--strict`
    #[error("{count} dependencies could not be added to the classpath")]
    Incomplete { count: usize },
}
