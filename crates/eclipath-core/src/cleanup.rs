//! Removal of library files no declared dependency occupies

use std::collections::HashSet;
use std::fs;

use eclipath_fs::{NormalizedPath, io};

use crate::artifact::Attachment;
use crate::placement::LibraryLayout;
use crate::reporter::Reporter;
use crate::{Error, Result};

const LIBRARY_EXTENSION: &str = "jar";

/// Result of [`remove_stale_files`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub removed: Vec<NormalizedPath>,
    pub failed: Vec<NormalizedPath>,
    pub removed_dirs: Vec<NormalizedPath>,
}

/// Sources, javadoc and library directories of each layout directory
pub fn library_directories(
    project_root: &NormalizedPath,
    layout: &LibraryLayout,
) -> Vec<NormalizedPath> {
    let mut dirs = Vec::new();
    for dir in layout.directories() {
        let base = project_root.join(dir);
        dirs.push(base.join(Attachment::Sources.as_str()));
        dirs.push(base.join(Attachment::Javadoc.as_str()));
        dirs.push(base);
    }
    dirs
}

/// Jar files in the layout's directories that are not in `occupied`.
pub fn find_stale_files(
    project_root: &NormalizedPath,
    layout: &LibraryLayout,
    occupied: &HashSet<NormalizedPath>,
) -> Result<Vec<NormalizedPath>> {
    let mut stale = Vec::new();
    for dir in library_directories(project_root, layout) {
        if !dir.is_dir() {
            continue;
        }
        let native = dir.to_native();
        let mut names: Vec<String> = fs::read_dir(&native)
            .map_err(|e| Error::Fs(eclipath_fs::Error::io(&native, e)))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();

        for name in names {
            let file = dir.join(&name);
            if file.extension() == Some(LIBRARY_EXTENSION) && !occupied.contains(&file) {
                stale.push(file);
            }
        }
    }
    Ok(stale)
}

/// Delete `files`, then any library directory left empty.
///
/// A file that cannot be deleted is reported and skipped.
pub fn remove_stale_files(
    project_root: &NormalizedPath,
    layout: &LibraryLayout,
    files: &[NormalizedPath],
    reporter: &dyn Reporter,
) -> CleanReport {
    let mut report = CleanReport::default();
    for file in files {
        match io::remove_if_exists(file) {
            Ok(_) => {
                reporter.info(&format!("Deleted {}", file));
                report.removed.push(file.clone());
            }
            Err(e) => {
                reporter.warn(&format!("Failed to delete {}: {}", file, e));
                report.failed.push(file.clone());
            }
        }
    }

    // Attachment directories come first so their parents can empty out
    for dir in library_directories(project_root, layout) {
        let native = dir.to_native();
        let is_empty = fs::read_dir(&native)
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(false);
        if is_empty && fs::remove_dir(&native).is_ok() {
            reporter.debug(&format!("Removed empty directory {}", dir));
            report.removed_dirs.push(dir);
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::CapturingReporter;
    use pretty_assertions::assert_eq;

    fn touch(root: &NormalizedPath, relative: &str) -> NormalizedPath {
        let path = root.join(relative);
        io::touch(&path).unwrap();
        path
    }

    #[test]
    fn finds_only_unoccupied_jars() {
        let temp = tempfile::TempDir::new().unwrap();
        let root = NormalizedPath::new(temp.path());
        let kept = touch(&root, "lib/foo-2.0.jar");
        let stale = touch(&root, "lib/foo-1.0.jar");
        let stale_source = touch(&root, "lib/sources/foo-1.0-sources.jar");
        touch(&root, "lib/readme.txt");
        let stale_test = touch(&root, "lib-test/junit-3.8.jar");

        let occupied: HashSet<NormalizedPath> = [kept].into_iter().collect();
        let found = find_stale_files(&root, &LibraryLayout::standalone(), &occupied).unwrap();

        assert_eq!(found, vec![stale_source, stale, stale_test]);
    }

    #[test]
    fn removal_deletes_files_and_empty_directories() {
        let temp = tempfile::TempDir::new().unwrap();
        let root = NormalizedPath::new(temp.path());
        let layout = LibraryLayout::standalone();
        let kept = touch(&root, "lib/foo-2.0.jar");
        let stale = touch(&root, "lib/sources/foo-1.0-sources.jar");
        let stale_test = touch(&root, "lib-test/junit-3.8.jar");
        let reporter = CapturingReporter::new();

        let stale_files = [stale.clone(), stale_test.clone()];
        let report = remove_stale_files(&root, &layout, &stale_files, &reporter);

        assert_eq!(report.removed, vec![stale, stale_test]);
        assert!(report.failed.is_empty());
        assert!(kept.is_file());
        assert!(!root.join("lib/sources").exists());
        assert!(!root.join("lib-test").exists());
        assert!(root.join("lib").is_dir());
    }
}
