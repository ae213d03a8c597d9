//! Manifest parsing for eclipath.toml

use std::path::PathBuf;

use eclipath_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::artifact::{Coordinate, Scope};
use crate::placement::{Exclusions, LayoutKind, LibraryLayout};
use crate::reconcile::ContainerSpec;
use crate::refresh::{DEFAULT_HOST, DEFAULT_PORT, RefreshClient};
use crate::resolver::{Attachments, LocalRepository};
use crate::{Error, Result};

fn default_true() -> bool {
    true
}

fn default_packaging() -> String {
    "jar".to_string()
}

fn default_variable() -> String {
    "M2_REPO".to_string()
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Where dependency files are referenced from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Through a classpath variable into the local repository
    #[default]
    Repository,
    /// Copied into the project
    Project,
}

/// `[classpath]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClasspathSection {
    #[serde(default)]
    pub policy: PolicyKind,

    /// Library layout preset; derived from `packaging` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutKind>,

    /// `war` selects the web layout when `layout` is unset
    #[serde(default = "default_packaging")]
    pub packaging: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lib_dir: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provided_lib_dir: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_lib_dir: Option<String>,

    /// Resolve source attachments
    #[serde(default = "default_true")]
    pub sources: bool,

    /// Resolve documentation attachments
    #[serde(default = "default_true")]
    pub javadoc: bool,

    /// Ignore not-available markers
    #[serde(default)]
    pub force_resolve: bool,

    #[serde(default)]
    pub exclude_groups: Vec<String>,

    #[serde(default)]
    pub exclude_scopes: Vec<Scope>,
}

impl Default for ClasspathSection {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            layout: None,
            packaging: default_packaging(),
            lib_dir: None,
            provided_lib_dir: None,
            test_lib_dir: None,
            sources: true,
            javadoc: true,
            force_resolve: false,
            exclude_groups: Vec::new(),
            exclude_scopes: Vec::new(),
        }
    }
}

/// `[repository]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySection {
    /// Local repository root; `~/.m2/repository` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<PathBuf>,

    /// Classpath variable that points at the local repository
    #[serde(default = "default_variable")]
    pub variable: String,
}

impl Default for RepositorySection {
    fn default() -> Self {
        Self {
            local: None,
            variable: default_variable(),
        }
    }
}

/// `[workspace]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// `[refresh]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshSection {
    /// Notify the IDE after a sync
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for RefreshSection {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_host(),
            port: default_port(),
        }
    }
}

/// `[compiler]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompilerSection {
    /// Target level such as `1.8` or `17`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Source level; defaults to the target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Project configuration parsed from eclipath.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub classpath: ClasspathSection,

    #[serde(default)]
    pub repository: RepositorySection,

    #[serde(default)]
    pub workspace: WorkspaceSection,

    #[serde(default)]
    pub refresh: RefreshSection,

    #[serde(default)]
    pub compiler: CompilerSection,

    /// Declared dependencies, in processing order
    #[serde(default)]
    pub dependencies: Vec<Coordinate>,
}

impl Manifest {
    /// Parse a manifest from TOML content
    ///
    /// # Example
    ///
    /// ```
    /// use eclipath_core::config::{Manifest, PolicyKind};
    ///
    /// let manifest = Manifest::parse(r#"
    /// [classpath]
    /// policy = "project"
    ///
    /// [[dependencies]]
    /// group = "junit"
    /// artifact = "junit"
    /// version = "4.13.2"
    /// scope = "test"
    /// "#).unwrap();
    ///
    /// assert_eq!(manifest.classpath.policy, PolicyKind::Project);
    /// assert_eq!(manifest.dependencies.len(), 1);
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load and validate a manifest file (TOML or JSON by extension)
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::config(format!("Manifest not found at {}", path)));
        }
        let manifest: Manifest = ConfigStore::new().load(path)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check values serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        let overrides = [
            ("lib_dir", &self.classpath.lib_dir),
            ("provided_lib_dir", &self.classpath.provided_lib_dir),
            ("test_lib_dir", &self.classpath.test_lib_dir),
        ];
        for (name, value) in overrides {
            if value.as_deref().is_some_and(|dir| dir.trim().is_empty()) {
                return Err(Error::config(format!("classpath.{} must not be empty", name)));
            }
        }
        if self.repository.variable.trim().is_empty() {
            return Err(Error::config("repository.variable must not be empty"));
        }
        let relative_local = self
            .repository
            .local
            .as_ref()
            .filter(|local| !NormalizedPath::new(local).is_absolute());
        if let Some(local) = relative_local {
            return Err(Error::config(format!(
                "repository.local must be an absolute path, got {}",
                local.display()
            )));
        }
        for dependency in &self.dependencies {
            if dependency.group.is_empty()
                || dependency.artifact.is_empty()
                || dependency.version.is_empty()
            {
                return Err(Error::config(format!(
                    "dependency {} needs group, artifact and version",
                    dependency
                )));
            }
        }
        Ok(())
    }

    /// Layout preset plus directory overrides
    pub fn library_layout(&self) -> LibraryLayout {
        let kind = match self.classpath.layout {
            Some(kind) => kind,
            None if self.classpath.packaging == "war" => LayoutKind::Web,
            None => LayoutKind::Standalone,
        };
        let mut layout = LibraryLayout::from_kind(kind);
        if let Some(dir) = &self.classpath.lib_dir {
            layout.compile_dir = dir.clone();
        }
        if let Some(dir) = &self.classpath.provided_lib_dir {
            layout.provided_dir = dir.clone();
        }
        if let Some(dir) = &self.classpath.test_lib_dir {
            layout.test_dir = dir.clone();
        }
        layout
    }

    pub fn exclusions(&self) -> Exclusions {
        Exclusions {
            groups: self.classpath.exclude_groups.clone(),
            scopes: self.classpath.exclude_scopes.clone(),
        }
    }

    pub fn attachments(&self) -> Attachments {
        Attachments {
            sources: self.classpath.sources,
            javadoc: self.classpath.javadoc,
        }
    }

    /// Whether any dependency needs the shared-repository variable
    pub fn needs_shared_repository(&self) -> bool {
        self.classpath.policy == PolicyKind::Repository || !self.exclusions().is_empty()
    }

    /// Configured local repository, else `~/.m2/repository`
    pub fn local_repository(&self) -> Result<PathBuf> {
        match &self.repository.local {
            Some(local) => Ok(local.clone()),
            None => LocalRepository::default_root().ok_or_else(|| {
                Error::config("Cannot determine the local repository; set repository.local")
            }),
        }
    }

    /// JRE container for the configured compiler target
    pub fn container(&self) -> Option<ContainerSpec> {
        self.compiler.target.as_deref().map(ContainerSpec::jre)
    }

    pub fn refresh_client(&self) -> RefreshClient {
        RefreshClient::new(self.refresh.host.clone(), self.refresh.port)
    }
}
