//! Reconciliation of the descriptor against declared dependencies
//!
//! One pass per run:
//!
//! 1. load the descriptor
//! 2. resolve and build a candidate entry per coordinate
//! 3. remove stale versions of each candidate's library
//! 4. append candidates that are not present yet
//! 5. remove orphans (full mode only)
//! 6. adjust the JRE container when configured
//! 7. write, only if something changed and this is not a dry run

use std::collections::HashSet;

use eclipath_fs::NormalizedPath;
use serde::Serialize;

use crate::Result;
use crate::artifact::{Coordinate, Dependency, VersionPattern};
use crate::classpath::{ClasspathDocument, ClasspathEntry, EntryId};
use crate::descriptor::DescriptorBuilder;
use crate::reporter::Reporter;
use crate::resolver::{Attachments, ResolutionFailure, ResolverAdapter};

/// Eclipse container id for the JRE
pub const JRE_CONTAINER: &str = "org.eclipse.jdt.launching.JRE_CONTAINER";

const STANDARD_VM_TYPE: &str = "org.eclipse.jdt.internal.debug.ui.launcher.StandardVMType";

/// Whether entries without a declared dependency are removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// Add, replace and remove orphans
    #[default]
    Full,
    /// Add and replace only
    Additive,
}

/// A `con` entry to keep in the descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    /// Existing containers whose path starts with this are replaced
    pub prefix: String,
    pub path: String,
}

impl ContainerSpec {
    /// JRE container for a compiler target such as `1.8` or `17`.
    ///
    /// Targets 1.2 through 1.5 use the `J2SE-` execution environment names.
    pub fn jre(target: &str) -> Self {
        let environment = match target {
            "1.2" | "1.3" | "1.4" | "1.5" => format!("J2SE-{}", target),
            _ => format!("JavaSE-{}", target),
        };
        Self {
            prefix: JRE_CONTAINER.to_string(),
            path: format!("{}/{}/{}", JRE_CONTAINER, STANDARD_VM_TYPE, environment),
        }
    }
}

/// Options for one reconciliation run
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    pub mode: SyncMode,
    /// Compute changes without writing the descriptor
    pub dry_run: bool,
    pub attachments: Attachments,
    pub container: Option<ContainerSpec>,
}

/// A dependency skipped because its files could not be placed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDependency {
    pub coordinate: Coordinate,
    pub reason: String,
}

/// Outcome of a reconciliation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileReport {
    pub mode: SyncMode,
    /// Entries appended to the descriptor
    pub added: Vec<ClasspathEntry>,
    /// Entries removed as stale versions or orphans
    pub removed: Vec<ClasspathEntry>,
    /// Required artifacts that did not resolve
    pub failures: Vec<ResolutionFailure>,
    /// Dependencies whose files could not be copied
    pub skipped: Vec<SkippedDependency>,
    /// Every dependency whose primary artifact resolved, in declaration order
    pub dependencies: Vec<Dependency>,
    pub container_changed: bool,
    /// Whether the document differs from what was loaded
    pub changed: bool,
    /// Whether the descriptor file was written
    pub written: bool,
}

impl ReconcileReport {
    /// True when no dependency failed or was skipped
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.skipped.is_empty()
    }

    /// Human-readable actions, prefixed for dry runs
    pub fn actions(&self, dry_run: bool) -> Vec<String> {
        let (add, remove) = if dry_run {
            ("[dry-run] Would add", "[dry-run] Would remove")
        } else {
            ("Added", "Removed")
        };
        let mut actions: Vec<String> = self
            .removed
            .iter()
            .map(|entry| format!("{} {}", remove, entry))
            .collect();
        actions.extend(self.added.iter().map(|entry| format!("{} {}", add, entry)));
        if self.container_changed {
            actions.push(if dry_run {
                "[dry-run] Would update JRE container".to_string()
            } else {
                "Updated JRE container".to_string()
            });
        }
        actions
    }
}

/// Merges declared dependencies into a [`ClasspathDocument`]
pub struct Reconciler<'a> {
    adapter: ResolverAdapter<'a>,
    builder: DescriptorBuilder<'a>,
    reporter: &'a dyn Reporter,
    options: ReconcileOptions,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        adapter: ResolverAdapter<'a>,
        builder: DescriptorBuilder<'a>,
        reporter: &'a dyn Reporter,
        options: ReconcileOptions,
    ) -> Self {
        Self {
            adapter,
            builder,
            reporter,
            options,
        }
    }

    pub fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    /// Load the descriptor at `path`, reconcile it and persist the result.
    pub fn reconcile(
        &self,
        path: &NormalizedPath,
        coordinates: &[Coordinate],
    ) -> Result<ReconcileReport> {
        let mut document = ClasspathDocument::load(path)?;
        let mut report = self.apply(&mut document, coordinates)?;

        if self.options.dry_run {
            self.reporter.debug("Dry run, descriptor not written");
        } else {
            report.written = document.write()?;
        }
        Ok(report)
    }

    /// Apply all edits to an already loaded document.
    pub fn apply(
        &self,
        document: &mut ClasspathDocument,
        coordinates: &[Coordinate],
    ) -> Result<ReconcileReport> {
        let mut report = ReconcileReport {
            mode: self.options.mode,
            ..ReconcileReport::default()
        };
        // Every candidate is built before the descriptor is touched, so a
        // library never removes the entry of another declared dependency.
        let mut candidates: Vec<(VersionPattern, ClasspathEntry)> = Vec::new();
        // Libraries whose existing entries must survive orphan removal
        let mut protected: Vec<VersionPattern> = Vec::new();

        for coordinate in coordinates {
            let pattern = VersionPattern::new(coordinate)?;

            let dependency = match self
                .adapter
                .resolve_dependency(coordinate, self.options.attachments)
            {
                Ok(dependency) => dependency,
                Err(failure) => {
                    report.failures.push(failure);
                    protected.push(pattern);
                    continue;
                }
            };

            match self.builder.build(&dependency) {
                Ok(candidate) => candidates.push((pattern, candidate)),
                Err(e) => {
                    self.reporter.warn(&format!("Skipping {}: {}", coordinate, e));
                    report.skipped.push(SkippedDependency {
                        coordinate: coordinate.clone(),
                        reason: e.to_string(),
                    });
                    protected.push(pattern);
                }
            }
            report.dependencies.push(dependency);
        }

        let wanted: Vec<&ClasspathEntry> = candidates.iter().map(|(_, entry)| entry).collect();

        for (pattern, candidate) in &candidates {
            // Stale versions and same-path entries with other attachments
            let mut stale: Vec<(EntryId, ClasspathEntry)> = document
                .find_by_pattern(pattern)
                .into_iter()
                .chain(document.find_by_path(&candidate.path))
                .filter(|tracked| !wanted.contains(&tracked.entry()))
                .map(|tracked| (tracked.id(), tracked.entry().clone()))
                .collect();
            stale.sort_by_key(|(id, _)| *id);
            stale.dedup_by_key(|(id, _)| *id);

            for (id, entry) in stale {
                if document.remove(id).is_some() {
                    self.reporter.info(&format!("Removed stale entry {}", entry.path));
                    report.removed.push(entry);
                }
            }

            if document.find_by_path(&candidate.path).is_none() {
                self.reporter.info(&format!("Added entry {}", candidate.path));
                document.add(candidate.clone());
                report.added.push(candidate.clone());
            }
        }

        if self.options.mode == SyncMode::Full {
            let wanted: HashSet<&str> = wanted.iter().map(|c| c.path.as_str()).collect();
            let orphans: Vec<(EntryId, ClasspathEntry)> = document
                .entries()
                .filter(|tracked| {
                    let path = tracked.entry().path.as_str();
                    !wanted.contains(path) && !protected.iter().any(|p| p.is_match(path))
                })
                .map(|tracked| (tracked.id(), tracked.entry().clone()))
                .collect();
            for (id, entry) in orphans {
                if document.remove(id).is_some() {
                    self.reporter.info(&format!("Removed orphan entry {}", entry.path));
                    report.removed.push(entry);
                }
            }
        }

        if let Some(container) = &self.options.container {
            report.container_changed =
                document.ensure_container(&container.prefix, &container.path);
        }

        report.changed = document.is_dirty();
        Ok(report)
    }
}
