//! Maven-layout directory lookup

use std::path::PathBuf;

use super::{ArtifactResolver, ResolveError};
use crate::artifact::Coordinate;

/// Resolves coordinates against a local Maven repository directory
#[derive(Debug, Clone)]
pub struct LocalRepository {
    root: PathBuf,
}

impl LocalRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `~/.m2/repository`, if a home directory is known
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".m2").join("repository"))
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

impl ArtifactResolver for LocalRepository {
    fn resolve(&self, coordinate: &Coordinate) -> Result<PathBuf, ResolveError> {
        let path = self.root.join(coordinate.repository_path());
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Ok(path),
            Ok(_) => Err(ResolveError::NotFound {
                coordinate: coordinate.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ResolveError::NotFound {
                coordinate: coordinate.to_string(),
            }),
            Err(source) => Err(ResolveError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_existing_artifact() {
        let temp = tempfile::TempDir::new().unwrap();
        let coordinate = Coordinate::new("org.example", "foo", "1.0");
        let file = temp.path().join("org/example/foo/1.0/foo-1.0.jar");
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(&file, b"jar").unwrap();

        let repository = LocalRepository::new(temp.path());
        assert_eq!(repository.resolve(&coordinate).unwrap(), file);
    }

    #[test]
    fn missing_artifact_is_not_found() {
        let temp = tempfile::TempDir::new().unwrap();
        let repository = LocalRepository::new(temp.path());
        let result = repository.resolve(&Coordinate::new("org.example", "foo", "1.0"));
        assert!(matches!(result, Err(ResolveError::NotFound { .. })));
    }
}
