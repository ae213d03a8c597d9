//! Eclipse project discovery and settings

use std::path::Path;

use eclipath_fs::{NormalizedPath, ProjectPath, io};

use crate::classpath::xml::{self, Node};
use crate::prefs::PreferencesFile;
use crate::{Error, Result};

/// Project-level JDT preferences, relative to the project root
pub const PROJECT_JDT_PREFS: &str = ".settings/org.eclipse.jdt.core.prefs";

const COMPLIANCE_KEY: &str = "org.eclipse.jdt.core.compiler.compliance";
const TARGET_PLATFORM_KEY: &str = "org.eclipse.jdt.core.compiler.codegen.targetPlatform";
const SOURCE_KEY: &str = "org.eclipse.jdt.core.compiler.source";

/// An Eclipse project: the directory holding `.project`, and its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub root: NormalizedPath,
    pub name: String,
}

impl Project {
    /// Walk up from `start` to the nearest directory containing `.project`.
    pub fn discover(start: &Path) -> Result<Self> {
        let start = NormalizedPath::new(start)
            .canonicalize()
            .map_err(|_| Error::ProjectNotFound {
                path: start.to_path_buf(),
            })?;

        let mut current = Some(start.clone());
        while let Some(dir) = current {
            if dir.join(ProjectPath::ProjectFile.as_str()).is_file() {
                return Self::open(dir);
            }
            current = dir.parent();
        }
        Err(Error::ProjectNotFound {
            path: start.to_native(),
        })
    }

    /// Open the project rooted at `root`.
    ///
    /// The name comes from `<projectDescription><name>`, falling back to
    /// the directory name.
    pub fn open(root: NormalizedPath) -> Result<Self> {
        let project_file = root.join(ProjectPath::ProjectFile.as_str());
        let declared = if project_file.is_file() {
            let text = io::read_text(&project_file)?;
            let document = xml::parse(&project_file.to_native(), &text)?;
            document
                .root
                .child_elements()
                .find(|e| e.name == "name")
                .map(|name| {
                    name.children
                        .iter()
                        .filter_map(|node| match node {
                            Node::Text(text) | Node::CData(text) => Some(text.as_str()),
                            _ => None,
                        })
                        .collect::<String>()
                })
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
        } else {
            None
        };

        let name = match declared {
            Some(name) => name,
            None => root
                .file_name()
                .map(str::to_string)
                .ok_or_else(|| Error::ProjectNotFound {
                    path: root.to_native(),
                })?,
        };
        Ok(Self { root, name })
    }

    pub fn classpath_path(&self) -> NormalizedPath {
        self.root.join(ProjectPath::Classpath.as_str())
    }

    pub fn manifest_path(&self) -> NormalizedPath {
        self.root.join(ProjectPath::Manifest.as_str())
    }

    /// Align the project's compiler settings with `target` and `source`.
    ///
    /// Only an existing `.settings/org.eclipse.jdt.core.prefs` is edited.
    /// Returns `true` if the file changed.
    pub fn adjust_compiler_settings(&self, target: &str, source: &str) -> Result<bool> {
        let path = self.root.join(PROJECT_JDT_PREFS);
        if !path.is_file() {
            tracing::debug!(path = %path, "No project JDT preferences");
            return Ok(false);
        }
        let mut prefs = PreferencesFile::load(&path)?;
        prefs.set(COMPLIANCE_KEY, target);
        prefs.set(TARGET_PLATFORM_KEY, target);
        prefs.set(SOURCE_KEY, source);
        prefs.save()
    }
}
