//! Artifact resolution
//!
//! [`ArtifactResolver`] is the lookup seam. [`ResolverAdapter`] turns a
//! declared coordinate into a [`Dependency`], treating companion lookups as
//! optional and remembering failed optional lookups with marker files.

mod local;

pub use local::LocalRepository;

use std::fmt;
use std::path::PathBuf;

use eclipath_fs::{NormalizedPath, io};
use serde::Serialize;

use crate::artifact::{Attachment, Coordinate, Dependency, ResolvedArtifact};
use crate::reporter::Reporter;

/// Suffix of the marker file left behind by a failed optional lookup
pub const NOT_AVAILABLE_SUFFIX: &str = "-not-available";

/// Why a lookup failed
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Artifact not found: {coordinate}")]
    NotFound { coordinate: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Finds the file of one coordinate
pub trait ArtifactResolver {
    fn resolve(&self, coordinate: &Coordinate) -> Result<PathBuf, ResolveError>;
}

/// A required artifact that could not be resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionFailure {
    pub coordinate: Coordinate,
    pub cause: String,
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.coordinate, self.cause)
    }
}

/// Which companions to look up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attachments {
    pub sources: bool,
    pub javadoc: bool,
}

impl Attachments {
    pub fn all() -> Self {
        Self {
            sources: true,
            javadoc: true,
        }
    }

    pub fn none() -> Self {
        Self {
            sources: false,
            javadoc: false,
        }
    }
}

impl Default for Attachments {
    fn default() -> Self {
        Self::all()
    }
}

/// Wraps an [`ArtifactResolver`] with required/optional semantics
pub struct ResolverAdapter<'a> {
    resolver: &'a dyn ArtifactResolver,
    reporter: &'a dyn Reporter,
    marker_root: Option<NormalizedPath>,
    force: bool,
}

impl<'a> ResolverAdapter<'a> {
    pub fn new(resolver: &'a dyn ArtifactResolver, reporter: &'a dyn Reporter) -> Self {
        Self {
            resolver,
            reporter,
            marker_root: None,
            force: false,
        }
    }

    /// Keep not-available markers below `root`
    pub fn with_marker_root(mut self, root: impl Into<NormalizedPath>) -> Self {
        self.marker_root = Some(root.into());
        self
    }

    /// Ignore and clear markers, always asking the resolver
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Resolve one artifact.
    ///
    /// A required failure is returned as an error; an optional failure
    /// yields an unresolved artifact.
    pub fn resolve(
        &self,
        coordinate: &Coordinate,
        required: bool,
    ) -> Result<ResolvedArtifact, ResolutionFailure> {
        let marker = self.marker_path(coordinate);

        if let Some(marker) = &marker {
            if self.force {
                if let Err(e) = io::remove_if_exists(marker) {
                    self.reporter.warn(&format!("Failed to clear marker {}: {}", marker, e));
                }
            } else if !required && marker.exists() {
                self.reporter
                    .debug(&format!("Skipping {} (marked not available)", coordinate));
                return Ok(ResolvedArtifact::unresolved(coordinate.clone()));
            }
        }

        match self.resolver.resolve(coordinate) {
            Ok(location) => {
                self.reporter
                    .debug(&format!("Resolved {} -> {}", coordinate, location.display()));
                Ok(ResolvedArtifact::resolved(coordinate.clone(), location))
            }
            Err(e) if required => {
                self.reporter.error(&format!("Failed to resolve {}: {}", coordinate, e));
                Err(ResolutionFailure {
                    coordinate: coordinate.clone(),
                    cause: e.to_string(),
                })
            }
            Err(e) => {
                self.reporter.debug(&format!("Optional artifact unavailable: {}", e));
                if let Some(marker) = &marker {
                    if let Err(e) = io::touch(marker) {
                        self.reporter.warn(&format!("Failed to write marker {}: {}", marker, e));
                    }
                }
                Ok(ResolvedArtifact::unresolved(coordinate.clone()))
            }
        }
    }

    /// Resolve the primary artifact, then the enabled companions.
    pub fn resolve_dependency(
        &self,
        coordinate: &Coordinate,
        attachments: Attachments,
    ) -> Result<Dependency, ResolutionFailure> {
        let primary = self.resolve(coordinate, true)?;
        let mut dependency = Dependency::new(primary);

        if attachments.sources {
            dependency.sources = self
                .resolve(&coordinate.companion(Attachment::Sources), false)
                .ok();
        }
        if attachments.javadoc {
            dependency.javadoc = self
                .resolve(&coordinate.companion(Attachment::Javadoc), false)
                .ok();
        }
        Ok(dependency)
    }

    fn marker_path(&self, coordinate: &Coordinate) -> Option<NormalizedPath> {
        self.marker_root.as_ref().map(|root| {
            root.join(&format!("{}{}", coordinate.repository_path(), NOT_AVAILABLE_SUFFIX))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::CapturingReporter;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Resolver backed by a map that records every lookup
    #[derive(Default)]
    struct MapResolver {
        files: HashMap<String, PathBuf>,
        calls: RefCell<Vec<String>>,
    }

    impl MapResolver {
        fn with(mut self, coordinate: &Coordinate) -> Self {
            self.files.insert(
                coordinate.repository_path(),
                PathBuf::from("/repo").join(coordinate.repository_path()),
            );
            self
        }
    }

    impl ArtifactResolver for MapResolver {
        fn resolve(&self, coordinate: &Coordinate) -> Result<PathBuf, ResolveError> {
            self.calls.borrow_mut().push(coordinate.file_name());
            self.files
                .get(&coordinate.repository_path())
                .cloned()
                .ok_or_else(|| ResolveError::NotFound {
                    coordinate: coordinate.to_string(),
                })
        }
    }

    #[test]
    fn required_failure_is_an_error() {
        let resolver = MapResolver::default();
        let reporter = CapturingReporter::new();
        let adapter = ResolverAdapter::new(&resolver, &reporter);

        let result = adapter.resolve(&Coordinate::new("g", "foo", "1.0"), true);
        let failure = result.unwrap_err();
        assert_eq!(failure.coordinate.artifact, "foo");
        assert!(failure.cause.contains("not found"));
    }

    #[test]
    fn optional_failure_is_unresolved() {
        let resolver = MapResolver::default();
        let reporter = CapturingReporter::new();
        let adapter = ResolverAdapter::new(&resolver, &reporter);

        let artifact = adapter.resolve(&Coordinate::new("g", "foo", "1.0"), false).unwrap();
        assert!(!artifact.is_resolved());
        assert!(reporter.at(crate::reporter::Level::Error).is_empty());
    }

    #[test]
    fn resolve_dependency_includes_enabled_companions() {
        let primary = Coordinate::new("g", "foo", "1.0");
        let resolver = MapResolver::default()
            .with(&primary)
            .with(&primary.companion(Attachment::Sources));
        let reporter = CapturingReporter::new();
        let adapter = ResolverAdapter::new(&resolver, &reporter);

        let dependency = adapter.resolve_dependency(&primary, Attachments::all()).unwrap();
        assert!(dependency.primary.is_resolved());
        assert!(dependency.sources.as_ref().unwrap().is_resolved());
        assert!(!dependency.javadoc.as_ref().unwrap().is_resolved());

        let bare = adapter.resolve_dependency(&primary, Attachments::none()).unwrap();
        assert!(bare.sources.is_none());
        assert!(bare.javadoc.is_none());
    }

    #[test]
    fn markers_skip_later_optional_lookups() {
        let temp = tempfile::TempDir::new().unwrap();
        let primary = Coordinate::new("g", "foo", "1.0");
        let resolver = MapResolver::default().with(&primary);
        let reporter = CapturingReporter::new();
        let adapter = ResolverAdapter::new(&resolver, &reporter).with_marker_root(temp.path());
        let sources = primary.companion(Attachment::Sources);

        adapter.resolve(&sources, false).unwrap();
        adapter.resolve(&sources, false).unwrap();

        assert_eq!(resolver.calls.borrow().len(), 1);
        let marker = temp
            .path()
            .join("g/foo/1.0/foo-1.0-sources.jar-not-available");
        assert!(marker.is_file());
    }

    #[test]
    fn force_clears_markers_and_always_asks() {
        let temp = tempfile::TempDir::new().unwrap();
        let sources = Coordinate::new("g", "foo", "1.0").companion(Attachment::Sources);
        let marker = temp
            .path()
            .join("g/foo/1.0/foo-1.0-sources.jar-not-available");
        std::fs::create_dir_all(marker.parent().unwrap()).unwrap();
        std::fs::write(&marker, b"").unwrap();

        let resolver = MapResolver::default().with(&sources);
        let reporter = CapturingReporter::new();
        let adapter = ResolverAdapter::new(&resolver, &reporter)
            .with_marker_root(temp.path())
            .with_force(true);

        let artifact = adapter.resolve(&sources, false).unwrap();
        assert!(artifact.is_resolved());
        assert!(!marker.exists());
        assert_eq!(resolver.calls.borrow().len(), 1);
    }

    #[test]
    fn markers_do_not_block_required_lookups() {
        let temp = tempfile::TempDir::new().unwrap();
        let primary = Coordinate::new("g", "foo", "1.0");
        let marker = temp.path().join("g/foo/1.0/foo-1.0.jar-not-available");
        std::fs::create_dir_all(marker.parent().unwrap()).unwrap();
        std::fs::write(&marker, b"").unwrap();

        let resolver = MapResolver::default().with(&primary);
        let reporter = CapturingReporter::new();
        let adapter = ResolverAdapter::new(&resolver, &reporter).with_marker_root(temp.path());

        assert!(adapter.resolve(&primary, true).unwrap().is_resolved());
    }
}
