//! Where libraries live and how the descriptor refers to them
//!
//! [`PlacementPolicy`] is chosen once per run. Project-local placement copies
//! files under scope-specific directories of the project; shared-repository
//! placement points into the local repository through a classpath variable.

use std::path::Path;

use eclipath_fs::NormalizedPath;
use serde::{Deserialize, Serialize};

use crate::artifact::{Attachment, Coordinate, Scope};
use crate::classpath::ClasspathKind;

/// Named preset for [`LibraryLayout`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    Flat,
    Standalone,
    Web,
}

/// Project-relative library directories by scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryLayout {
    pub compile_dir: String,
    pub provided_dir: String,
    pub test_dir: String,
}

impl LibraryLayout {
    /// Everything in `lib`
    pub fn flat() -> Self {
        Self {
            compile_dir: "lib".to_string(),
            provided_dir: "lib".to_string(),
            test_dir: "lib".to_string(),
        }
    }

    /// `lib`, `lib-provided` and `lib-test`
    pub fn standalone() -> Self {
        Self {
            compile_dir: "lib".to_string(),
            provided_dir: "lib-provided".to_string(),
            test_dir: "lib-test".to_string(),
        }
    }

    /// Runtime libraries under `WEB-INF/lib`, the rest in `lib`
    pub fn web() -> Self {
        Self {
            compile_dir: "WEB-INF/lib".to_string(),
            provided_dir: "lib".to_string(),
            test_dir: "lib".to_string(),
        }
    }

    pub fn from_kind(kind: LayoutKind) -> Self {
        match kind {
            LayoutKind::Flat => Self::flat(),
            LayoutKind::Standalone => Self::standalone(),
            LayoutKind::Web => Self::web(),
        }
    }

    /// Directory for libraries of the given scope
    pub fn library_dir(&self, scope: Scope) -> &str {
        match scope {
            Scope::Provided => self.provided_dir.as_str(),
            Scope::Test => self.test_dir.as_str(),
            Scope::Compile | Scope::Runtime | Scope::System | Scope::Import => {
                self.compile_dir.as_str()
            }
        }
    }

    /// Distinct library directories, in compile/provided/test order
    pub fn directories(&self) -> Vec<&str> {
        let mut dirs: Vec<&str> = Vec::new();
        for dir in [&self.compile_dir, &self.provided_dir, &self.test_dir] {
            if !dirs.contains(&dir.as_str()) {
                dirs.push(dir.as_str());
            }
        }
        dirs
    }
}

impl Default for LibraryLayout {
    fn default() -> Self {
        Self::standalone()
    }
}

/// Shared local repository referenced through a classpath variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedRepository {
    /// Variable name, e.g. `M2_REPO`
    pub variable: String,
    /// Value of the variable in the workspace, when known
    pub base_dir: Option<String>,
}

impl SharedRepository {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            base_dir: None,
        }
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<String>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// `<VAR>/<repository path>`
    pub fn entry_path(&self, coordinate: &Coordinate) -> String {
        format!("{}/{}", self.variable, coordinate.repository_path())
    }

    /// `<VAR>/<path>` for a resolved file.
    ///
    /// The path is `location` relative to `base_dir` when the file lies below
    /// it, otherwise the coordinate's repository path.
    pub fn locate(&self, coordinate: &Coordinate, location: &Path) -> String {
        let relative = self.base_dir.as_deref().and_then(|base| {
            let base = NormalizedPath::new(base.trim_end_matches('/'));
            NormalizedPath::new(location)
                .relative_to(&base)
                .filter(|relative| !relative.is_empty())
        });
        match relative {
            Some(relative) => format!("{}/{}", self.variable, relative),
            None => self.entry_path(coordinate),
        }
    }
}

/// How dependencies are placed and referenced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementPolicy {
    ProjectLocal(LibraryLayout),
    SharedRepository(SharedRepository),
}

impl PlacementPolicy {
    pub fn is_project_local(&self) -> bool {
        matches!(self, Self::ProjectLocal(_))
    }

    /// Entry kind written for dependencies under this policy
    pub fn entry_kind(&self) -> ClasspathKind {
        match self {
            Self::ProjectLocal(_) => ClasspathKind::Library,
            Self::SharedRepository(_) => ClasspathKind::Variable,
        }
    }

    /// Base directory for the scope; the variable name for shared placement
    pub fn library_dir(&self, scope: Scope) -> &str {
        match self {
            Self::ProjectLocal(layout) => layout.library_dir(scope),
            Self::SharedRepository(shared) => shared.variable.as_str(),
        }
    }

    /// Descriptor path of the primary artifact or one of its attachments.
    ///
    /// Project-local attachments live in `<libdir>/sources` and
    /// `<libdir>/javadoc`.
    pub fn entry_path(&self, primary: &Coordinate, attachment: Option<Attachment>) -> String {
        let target = match attachment {
            Some(kind) => primary.companion(kind),
            None => primary.clone(),
        };
        match self {
            Self::ProjectLocal(layout) => {
                let dir = layout.library_dir(primary.scope).trim_end_matches('/');
                match attachment {
                    Some(kind) => format!("{}/{}/{}", dir, kind.as_str(), target.file_name()),
                    None => format!("{}/{}", dir, target.file_name()),
                }
            }
            Self::SharedRepository(shared) => shared.entry_path(&target),
        }
    }
}

/// Coordinates diverted to shared-repository placement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exclusions {
    pub groups: Vec<String>,
    pub scopes: Vec<Scope>,
}

impl Exclusions {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.scopes.is_empty()
    }

    pub fn matches(&self, coordinate: &Coordinate) -> bool {
        self.groups.iter().any(|g| *g == coordinate.group)
            || self.scopes.contains(&coordinate.scope)
    }
}
