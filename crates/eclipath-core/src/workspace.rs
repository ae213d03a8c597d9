//! Eclipse workspace discovery and classpath variables

use std::path::Path;

use eclipath_fs::{NormalizedPath, ProjectPath};

use crate::prefs::PreferencesFile;
use crate::{Error, Result};

/// Preference key prefix for classpath variables
pub const CLASSPATH_VARIABLE_PREFIX: &str = "org.eclipse.jdt.core.classpathVariable.";

/// An Eclipse workspace directory (one that holds `.metadata/.plugins`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: NormalizedPath,
}

impl Workspace {
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self { root: root.into() }
    }

    /// Find the workspace for a project.
    ///
    /// An explicitly configured directory wins; otherwise the project's
    /// parent directory is used when it contains workspace metadata.
    pub fn locate(project_root: &NormalizedPath, configured: Option<&Path>) -> Result<Self> {
        if let Some(dir) = configured {
            let root = NormalizedPath::new(dir);
            if root.is_dir() {
                return Ok(Self::new(root));
            }
            tracing::warn!(dir = %root, "Configured workspace directory does not exist");
            return Err(Error::WorkspaceNotFound {
                project: project_root.to_native(),
            });
        }

        match project_root.parent() {
            Some(parent) if Self::is_workspace(&parent) => Ok(Self::new(parent)),
            _ => Err(Error::WorkspaceNotFound {
                project: project_root.to_native(),
            }),
        }
    }

    /// Whether `dir` contains workspace metadata
    pub fn is_workspace(dir: &NormalizedPath) -> bool {
        dir.join(ProjectPath::WorkspaceMetadata.as_str()).is_dir()
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// The JDT core preferences file holding classpath variables
    pub fn prefs_path(&self) -> NormalizedPath {
        self.root.join(ProjectPath::WorkspaceJdtPrefs.as_str())
    }

    /// Value of classpath variable `name`, if set
    pub fn classpath_variable(&self, name: &str) -> Result<Option<String>> {
        let prefs = PreferencesFile::load(&self.prefs_path())?;
        Ok(prefs
            .get(&format!("{}{}", CLASSPATH_VARIABLE_PREFIX, name))
            .map(str::to_string))
    }

    /// Value of classpath variable `name`, or a configuration error
    pub fn require_variable(&self, name: &str) -> Result<String> {
        self.classpath_variable(name)?
            .ok_or_else(|| Error::VariableNotConfigured {
                variable: name.to_string(),
                prefs: self.prefs_path().to_native(),
            })
    }

    /// Point classpath variable `name` at `value`. Returns `true` if the
    /// preferences file changed.
    pub fn set_classpath_variable(&self, name: &str, value: &NormalizedPath) -> Result<bool> {
        let mut prefs = PreferencesFile::load(&self.prefs_path())?;
        prefs.set(&format!("{}{}", CLASSPATH_VARIABLE_PREFIX, name), value.as_str());
        let written = prefs.save()?;
        if written {
            tracing::info!(variable = name, value = %value, "Configured classpath variable");
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn workspace_with_project() -> (tempfile::TempDir, NormalizedPath) {
        let temp = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".metadata/.plugins")).unwrap();
        let project = temp.path().join("proj");
        fs::create_dir_all(&project).unwrap();
        (temp, NormalizedPath::new(project))
    }

    #[test]
    fn locate_uses_parent_with_metadata() {
        let (temp, project) = workspace_with_project();
        let workspace = Workspace::locate(&project, None).unwrap();
        assert_eq!(workspace.root(), &NormalizedPath::new(temp.path()));
    }

    #[test]
    fn locate_fails_without_metadata() {
        let temp = tempfile::TempDir::new().unwrap();
        let project = NormalizedPath::new(temp.path().join("proj"));
        assert!(matches!(
            Workspace::locate(&project, None),
            Err(Error::WorkspaceNotFound { .. })
        ));
    }

    #[test]
    fn configured_directory_wins() {
        let (_temp, project) = workspace_with_project();
        let other = tempfile::TempDir::new().unwrap();
        let workspace = Workspace::locate(&project, Some(other.path())).unwrap();
        assert_eq!(workspace.root(), &NormalizedPath::new(other.path()));
    }

    #[test]
    fn variable_round_trip() {
        let (temp, _project) = workspace_with_project();
        let workspace = Workspace::new(temp.path());

        assert!(matches!(
            workspace.require_variable("M2_REPO"),
            Err(Error::VariableNotConfigured { .. })
        ));

        let repo = NormalizedPath::new("/home/me/.m2/repository");
        assert!(workspace.set_classpath_variable("M2_REPO", &repo).unwrap());
        assert!(!workspace.set_classpath_variable("M2_REPO", &repo).unwrap());
        assert_eq!(workspace.require_variable("M2_REPO").unwrap(), "/home/me/.m2/repository");
    }
}
