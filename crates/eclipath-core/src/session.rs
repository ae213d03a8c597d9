//! One project, its manifest, and the operations run against them
//!
//! A [`Session`] wires the manifest into the placement policy, resolver
//! adapter, descriptor builder and reconciler for each operation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use eclipath_fs::NormalizedPath;

use crate::artifact::{Dependency, ResolvedArtifact};
use crate::cleanup::{self, CleanReport};
use crate::config::{Manifest, PolicyKind};
use crate::descriptor::DescriptorBuilder;
use crate::placement::{PlacementPolicy, SharedRepository};
use crate::project::Project;
use crate::reconcile::{ReconcileOptions, ReconcileReport, Reconciler, SyncMode};
use crate::report::ResolutionReport;
use crate::reporter::Reporter;
use crate::resolver::{LocalRepository, ResolverAdapter};
use crate::workspace::Workspace;
use crate::Result;

const JSON_MANIFEST: &str = "eclipath.json";

/// Options for [`Session::sync`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub mode: SyncMode,
    pub dry_run: bool,
    /// Ignore not-available markers for this run
    pub force_resolve: bool,
}

/// A discovered project with its loaded manifest
#[derive(Debug, Clone)]
pub struct Session {
    project: Project,
    manifest: Manifest,
    local_repository: PathBuf,
}

impl Session {
    /// Find the project at or above `start` and load its manifest.
    pub fn open(start: &Path) -> Result<Self> {
        let project = Project::discover(start)?;
        let toml_path = project.manifest_path();
        let json_path = project.root.join(JSON_MANIFEST);
        let manifest_path = if !toml_path.is_file() && json_path.is_file() {
            json_path
        } else {
            toml_path
        };
        tracing::debug!(manifest = %manifest_path, "Loading manifest");
        let manifest = Manifest::load(&manifest_path)?;
        Self::new(project, manifest)
    }

    pub fn new(project: Project, manifest: Manifest) -> Result<Self> {
        let local_repository = manifest.local_repository()?;
        Ok(Self {
            project,
            manifest,
            local_repository,
        })
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn local_repository(&self) -> &Path {
        &self.local_repository
    }

    /// Reconcile the descriptor with the manifest's dependencies.
    ///
    /// Fails before touching the descriptor when the shared-repository
    /// variable is needed but not configured.
    pub fn sync(&self, options: RunOptions, reporter: &dyn Reporter) -> Result<ReconcileReport> {
        let builder = self.builder(reporter, true)?.with_copy(!options.dry_run);
        let repository = LocalRepository::new(&self.local_repository);
        let adapter = self.adapter(&repository, reporter, options.force_resolve);

        let reconcile_options = ReconcileOptions {
            mode: options.mode,
            dry_run: options.dry_run,
            attachments: self.manifest.attachments(),
            container: self.manifest.container(),
        };
        let reconciler = Reconciler::new(adapter, builder, reporter, reconcile_options);
        let report =
            reconciler.reconcile(&self.project.classpath_path(), &self.manifest.dependencies)?;

        if !options.dry_run {
            if let Some(target) = &self.manifest.compiler.target {
                let source = self.manifest.compiler.source.as_deref().unwrap_or(target.as_str());
                if self.project.adjust_compiler_settings(target, source)? {
                    reporter.info(&format!("Updated compiler settings to {}", target));
                }
            }
        }
        Ok(report)
    }

    /// Resolve every dependency without changing the project.
    pub fn resolution_report(
        &self,
        force_resolve: bool,
        reporter: &dyn Reporter,
    ) -> Result<ResolutionReport> {
        let builder = self.builder(reporter, false)?.with_copy(false);
        let repository = LocalRepository::new(&self.local_repository);
        let adapter = self.adapter(&repository, reporter, force_resolve);

        let mut report = ResolutionReport::default();
        for coordinate in &self.manifest.dependencies {
            let dependency = adapter
                .resolve_dependency(coordinate, self.manifest.attachments())
                .unwrap_or_else(|_| {
                    Dependency::new(ResolvedArtifact::unresolved(coordinate.clone()))
                });
            if builder.placement_for(coordinate).is_project_local() {
                report.project.push(dependency);
            } else {
                report.repository.push(dependency);
            }
        }
        Ok(report)
    }

    /// Library files in the project directories that no dependency occupies.
    pub fn stale_files(&self, reporter: &dyn Reporter) -> Result<Vec<NormalizedPath>> {
        if self.manifest.classpath.policy != PolicyKind::Project {
            reporter.info("Repository policy keeps no libraries in the project");
            return Ok(Vec::new());
        }
        let builder = self.builder(reporter, false)?;
        let occupied: HashSet<NormalizedPath> = self
            .manifest
            .dependencies
            .iter()
            .flat_map(|coordinate| builder.local_files(coordinate))
            .collect();
        cleanup::find_stale_files(&self.project.root, &self.manifest.library_layout(), &occupied)
    }

    /// Delete stale library files and emptied library directories.
    pub fn clean(&self, reporter: &dyn Reporter) -> Result<CleanReport> {
        let files = self.stale_files(reporter)?;
        Ok(cleanup::remove_stale_files(
            &self.project.root,
            &self.manifest.library_layout(),
            &files,
            reporter,
        ))
    }

    /// Ask the IDE to refresh this project.
    pub fn refresh(&self) -> Result<()> {
        self.manifest.refresh_client().refresh(&self.project.name)
    }

    /// Point the shared-repository variable at the local repository.
    /// Returns `true` if the workspace preferences changed.
    pub fn configure_workspace(&self) -> Result<bool> {
        let workspace = self.workspace()?;
        workspace.set_classpath_variable(
            &self.manifest.repository.variable,
            &NormalizedPath::new(&self.local_repository),
        )
    }

    fn workspace(&self) -> Result<Workspace> {
        Workspace::locate(&self.project.root, self.manifest.workspace.dir.as_deref())
    }

    /// Shared repository with its workspace value.
    ///
    /// When `required`, a missing workspace or variable is an error;
    /// otherwise only the variable name is used.
    fn shared_repository(&self, required: bool) -> Result<SharedRepository> {
        let variable = self.manifest.repository.variable.clone();
        let value = match self.workspace() {
            Ok(workspace) if required => Some(workspace.require_variable(&variable)?),
            Ok(workspace) => workspace.classpath_variable(&variable).ok().flatten(),
            Err(e) if required => return Err(e),
            Err(_) => None,
        };

        let shared = SharedRepository::new(variable);
        match value {
            Some(value) => {
                let configured = NormalizedPath::new(value.trim_end_matches('/'));
                let local = NormalizedPath::new(&self.local_repository);
                if configured.as_str() != local.as_str().trim_end_matches('/') {
                    tracing::warn!(
                        variable = %shared.variable,
                        configured = %configured,
                        local = %local,
                        "Classpath variable does not point at the local repository"
                    );
                }
                Ok(shared.with_base_dir(configured.as_str()))
            }
            None => Ok(shared),
        }
    }

    fn builder<'a>(
        &self,
        reporter: &'a dyn Reporter,
        required: bool,
    ) -> Result<DescriptorBuilder<'a>> {
        let policy = match self.manifest.classpath.policy {
            PolicyKind::Project => PlacementPolicy::ProjectLocal(self.manifest.library_layout()),
            PolicyKind::Repository => {
                PlacementPolicy::SharedRepository(self.shared_repository(required)?)
            }
        };
        let project_local = policy.is_project_local();
        let builder = DescriptorBuilder::new(
            self.project.root.clone(),
            self.project.name.clone(),
            policy,
            reporter,
        );

        let exclusions = self.manifest.exclusions();
        if project_local && !exclusions.is_empty() {
            Ok(builder.with_exclusions(exclusions, self.shared_repository(required)?))
        } else {
            Ok(builder)
        }
    }

    fn adapter<'a>(
        &self,
        repository: &'a LocalRepository,
        reporter: &'a dyn Reporter,
        force: bool,
    ) -> ResolverAdapter<'a> {
        ResolverAdapter::new(repository, reporter)
            .with_marker_root(repository.root().as_path())
            .with_force(force || self.manifest.classpath.force_resolve)
    }
}
