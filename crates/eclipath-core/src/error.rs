//! Error types for eclipath-core

use std::path::PathBuf;

/// Result type for eclipath-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in eclipath-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid or incomplete configuration
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The shared-repository variable is missing from the workspace preferences
    #[error("Classpath variable {variable} is not configured in {prefs}")]
    VariableNotConfigured { variable: String, prefs: PathBuf },

    /// No Eclipse workspace could be located for the project
    #[error("No Eclipse workspace found for project at {project}")]
    WorkspaceNotFound { project: PathBuf },

    /// No `.project` file at or above the given directory
    #[error("No Eclipse project found at or above {path}")]
    ProjectNotFound { path: PathBuf },

    /// Unknown dependency scope
    #[error("Invalid scope: {scope}")]
    InvalidScope { scope: String },

    /// A dependency reached placement without a resolved primary artifact
    #[error("Artifact not resolved: {coordinate}")]
    Unresolved { coordinate: String },

    /// Malformed XML content
    #[error("XML error in {path}: {message}")]
    Xml { path: PathBuf, message: String },

    /// Well-formed XML that is not a classpath descriptor
    #[error("Invalid descriptor {path}: {message}")]
    InvalidDescriptor { path: PathBuf, message: String },

    /// IDE refresh notification failed
    #[error("Refresh failed: {message}")]
    Refresh { message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from eclipath-fs
    #[error(transparent)]
    Fs(#[from] eclipath_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Invalid regular expression
    #[error(transparent)]
    Pattern(#[from] regex::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn xml(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Xml {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
