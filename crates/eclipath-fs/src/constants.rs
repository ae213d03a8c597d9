//! Well-known file names inside an Eclipse project and workspace.

use std::path::Path;

/// Standard project and workspace paths, relative to their owning directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectPath {
    /// The `.classpath` descriptor at the project root
    Classpath,
    /// The `.project` file naming the Eclipse project
    ProjectFile,
    /// The `eclipath.toml` manifest at the project root
    Manifest,
    /// Marker directory that identifies an Eclipse workspace
    WorkspaceMetadata,
    /// JDT core preferences inside a workspace (holds classpath variables)
    WorkspaceJdtPrefs,
}

impl ProjectPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classpath => ".classpath",
            Self::ProjectFile => ".project",
            Self::Manifest => "eclipath.toml",
            Self::WorkspaceMetadata => ".metadata/.plugins",
            Self::WorkspaceJdtPrefs => {
                ".metadata/.plugins/org.eclipse.core.runtime/.settings/org.eclipse.jdt.core.prefs"
            }
        }
    }
}

impl AsRef<Path> for ProjectPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ProjectPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
