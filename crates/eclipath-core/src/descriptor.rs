//! Turns resolved dependencies into classpath entries

use std::path::Path;

use eclipath_fs::{CopyOutcome, NormalizedPath, io};

use crate::artifact::{Attachment, Coordinate, Dependency};
use crate::classpath::ClasspathEntry;
use crate::placement::{Exclusions, PlacementPolicy, SharedRepository};
use crate::reporter::Reporter;
use crate::{Error, Result};

/// Builds one [`ClasspathEntry`] per dependency under the active policy.
///
/// With project-local placement the primary artifact and its resolved
/// attachments are copied into the project when missing or older.
pub struct DescriptorBuilder<'a> {
    project_root: NormalizedPath,
    project_name: String,
    policy: PlacementPolicy,
    shared: Option<PlacementPolicy>,
    exclusions: Exclusions,
    copy_files: bool,
    reporter: &'a dyn Reporter,
}

impl<'a> DescriptorBuilder<'a> {
    pub fn new(
        project_root: NormalizedPath,
        project_name: impl Into<String>,
        policy: PlacementPolicy,
        reporter: &'a dyn Reporter,
    ) -> Self {
        let shared = match &policy {
            PlacementPolicy::SharedRepository(_) => Some(policy.clone()),
            PlacementPolicy::ProjectLocal(_) => None,
        };
        Self {
            project_root,
            project_name: project_name.into(),
            policy,
            shared,
            exclusions: Exclusions::default(),
            copy_files: true,
            reporter,
        }
    }

    /// Divert matching coordinates to `shared` placement
    pub fn with_exclusions(mut self, exclusions: Exclusions, shared: SharedRepository) -> Self {
        self.exclusions = exclusions;
        self.shared = Some(PlacementPolicy::SharedRepository(shared));
        self
    }

    /// Compute entries without copying anything (dry-run)
    pub fn with_copy(mut self, copy_files: bool) -> Self {
        self.copy_files = copy_files;
        self
    }

    pub fn policy(&self) -> &PlacementPolicy {
        &self.policy
    }

    /// Placement applied to `coordinate` after exclusions
    pub fn placement_for(&self, coordinate: &Coordinate) -> &PlacementPolicy {
        match &self.shared {
            Some(shared) if self.exclusions.matches(coordinate) => shared,
            _ => &self.policy,
        }
    }

    /// Build the entry for a dependency whose primary artifact resolved.
    ///
    /// A failed copy fails the whole dependency.
    pub fn build(&self, dependency: &Dependency) -> Result<ClasspathEntry> {
        let coordinate = dependency.coordinate();
        let location = dependency
            .primary
            .location
            .as_deref()
            .ok_or_else(|| Error::Unresolved {
                coordinate: coordinate.to_string(),
            })?;
        let policy = self.placement_for(coordinate);

        let entry = match policy {
            PlacementPolicy::ProjectLocal(_) => {
                let path = policy.entry_path(coordinate, None);
                self.place(location, &path)?;
                let mut entry = ClasspathEntry::new(policy.entry_kind(), path);

                if let Some(source) = dependency.attachment_location(Attachment::Sources) {
                    let source_path = policy.entry_path(coordinate, Some(Attachment::Sources));
                    self.place(source, &source_path)?;
                    entry = entry.with_source_path(source_path);
                }
                if let Some(javadoc) = dependency.attachment_location(Attachment::Javadoc) {
                    let javadoc_path = policy.entry_path(coordinate, Some(Attachment::Javadoc));
                    self.place(javadoc, &javadoc_path)?;
                    entry = entry.with_javadoc_location(format!(
                        "jar:platform:/resource/{}/{}!/",
                        self.project_name, javadoc_path
                    ));
                }
                entry
            }
            PlacementPolicy::SharedRepository(shared) => {
                let mut entry =
                    ClasspathEntry::new(policy.entry_kind(), shared.locate(coordinate, location));

                if let Some(source) = dependency.attachment_location(Attachment::Sources) {
                    let companion = coordinate.companion(Attachment::Sources);
                    entry = entry.with_source_path(shared.locate(&companion, source));
                }
                if let Some(javadoc) = dependency.attachment_location(Attachment::Javadoc) {
                    let absolute = NormalizedPath::new(javadoc);
                    entry = entry.with_javadoc_location(format!(
                        "jar:file:/{}!/",
                        absolute.as_str().trim_start_matches('/')
                    ));
                }
                entry
            }
        };

        Ok(entry)
    }

    /// Project files a coordinate occupies under project-local placement.
    ///
    /// Empty when the coordinate is placed in the shared repository.
    pub fn local_files(&self, coordinate: &Coordinate) -> Vec<NormalizedPath> {
        let policy = self.placement_for(coordinate);
        if !policy.is_project_local() {
            return Vec::new();
        }
        [None, Some(Attachment::Sources), Some(Attachment::Javadoc)]
            .into_iter()
            .map(|attachment| self.project_root.join(&policy.entry_path(coordinate, attachment)))
            .collect()
    }

    fn place(&self, source: &Path, relative: &str) -> Result<()> {
        let dest = self.project_root.join(relative);
        if !self.copy_files {
            self.reporter
                .debug(&format!("Would copy {} to {}", source.display(), dest));
            return Ok(());
        }
        match io::copy_if_newer(source, &dest)? {
            CopyOutcome::Copied => self.reporter.info(&format!("Copied {}", relative)),
            CopyOutcome::UpToDate => self.reporter.debug(&format!("Up to date: {}", relative)),
        }
        Ok(())
    }
}
