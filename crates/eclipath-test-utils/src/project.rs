//! [`TestProject`] builder for eclipath test scenarios.
//!
//! Directory layout inside the temporary directory:
//!
//! ```text
//! <tmp>/
//!   .metadata/.plugins/      (after init_workspace)
//!   repo/                    fake local repository
//!   <name>/.project          the Eclipse project
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const JDT_PREFS: &str =
    ".metadata/.plugins/org.eclipse.core.runtime/.settings/org.eclipse.jdt.core.prefs";

/// A temporary Eclipse project with helper methods for setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use eclipath_test_utils::TestProject;
///
/// let project = TestProject::new();
/// project.install_library("org.example", "foo", "1.0", true, false);
/// project.write_manifest(&format!(
///     "{}\n[classpath]\npolicy = \"project\"\n\n[[dependencies]]\ngroup = \"org.example\"\nartifact = \"foo\"\nversion = \"1.0\"\n",
///     project.repository_toml()
/// ));
/// project.assert_file_exists(".project");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
    name: String,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create a project named `demo`.
    pub fn new() -> Self {
        Self::named("demo")
    }

    /// Create a project with the given Eclipse project name.
    pub fn named(name: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join(name);
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(temp_dir.path().join("repo")).unwrap();
        fs::write(
            root.join(".project"),
            format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<projectDescription>\n\t<name>{}</name>\n\t<comment></comment>\n</projectDescription>\n",
                name
            ),
        )
        .unwrap();
        Self {
            temp_dir,
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The project directory.
    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join(&self.name)
    }

    /// The directory that becomes the Eclipse workspace.
    pub fn workspace_root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The fake local repository.
    pub fn repository(&self) -> PathBuf {
        self.temp_dir.path().join("repo")
    }

    /// A path relative to the project root.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// `[repository]` manifest section pointing at the fake repository.
    pub fn repository_toml(&self) -> String {
        format!("[repository]\nlocal = '{}'\n", forward_slashes(&self.repository()))
    }

    /// Mark the parent directory as an Eclipse workspace.
    pub fn init_workspace(&self) -> &Self {
        fs::create_dir_all(self.workspace_root().join(".metadata/.plugins")).unwrap();
        self
    }

    /// Set a classpath variable in the workspace JDT preferences.
    pub fn set_workspace_variable(&self, name: &str, value: &Path) -> &Self {
        self.init_workspace();
        let prefs = self.workspace_root().join(JDT_PREFS);
        fs::create_dir_all(prefs.parent().unwrap()).unwrap();
        let mut content = fs::read_to_string(&prefs).unwrap_or_default();
        content.push_str(&format!(
            "org.eclipse.jdt.core.classpathVariable.{}={}\n",
            name,
            forward_slashes(value).replace(':', "\\:")
        ));
        fs::write(prefs, content).unwrap();
        self
    }

    /// Read the workspace JDT preferences.
    pub fn read_workspace_prefs(&self) -> String {
        fs::read_to_string(self.workspace_root().join(JDT_PREFS)).unwrap_or_default()
    }

    /// Put an artifact into the fake repository and return its path.
    pub fn install(
        &self,
        group: &str,
        artifact: &str,
        version: &str,
        classifier: Option<&str>,
    ) -> PathBuf {
        let file_name = match classifier {
            Some(classifier) => format!("{}-{}-{}.jar", artifact, version, classifier),
            None => format!("{}-{}.jar", artifact, version),
        };
        let path = self
            .repository()
            .join(group.replace('.', "/"))
            .join(artifact)
            .join(version)
            .join(file_name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, format!("{}:{}:{}", group, artifact, version)).unwrap();
        path
    }

    /// Install a primary artifact and, optionally, its attachments.
    pub fn install_library(
        &self,
        group: &str,
        artifact: &str,
        version: &str,
        sources: bool,
        javadoc: bool,
    ) -> PathBuf {
        let primary = self.install(group, artifact, version, None);
        if sources {
            self.install(group, artifact, version, Some("sources"));
        }
        if javadoc {
            self.install(group, artifact, version, Some("javadoc"));
        }
        primary
    }

    /// Write `eclipath.toml` at the project root.
    pub fn write_manifest(&self, content: &str) {
        self.write_file("eclipath.toml", content);
    }

    /// Write `.classpath` at the project root.
    pub fn write_classpath(&self, content: &str) {
        self.write_file(".classpath", content);
    }

    /// Read `.classpath` from the project root.
    pub fn read_classpath(&self) -> String {
        fs::read_to_string(self.path(".classpath")).unwrap()
    }

    /// Write a file relative to the project root, creating parents.
    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Assert that `path` (relative to the project root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the project root) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to the project root) contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let full_path = self.path(path);
        let file_content = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            full_path.display(),
            content,
            file_content
        );
    }
}

fn forward_slashes(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}
