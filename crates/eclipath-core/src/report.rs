//! Dependency resolution report
//!
//! Lists every declared dependency with `[R]` (resolved) or `[N]` (not
//! resolved) markers, grouped by placement.

use std::fmt::Write;

use serde::Serialize;

use crate::artifact::{Dependency, ResolvedArtifact};

const SEPARATOR: &str =
    "------------------------------------------------------------------------";

/// Resolution results grouped by placement
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolutionReport {
    /// Dependencies copied into the project
    pub project: Vec<Dependency>,
    /// Dependencies referenced through the shared repository
    pub repository: Vec<Dependency>,
}

impl ResolutionReport {
    pub fn is_empty(&self) -> bool {
        self.project.is_empty() && self.repository.is_empty()
    }

    /// Dependencies whose primary artifact did not resolve
    pub fn unresolved(&self) -> impl Iterator<Item = &Dependency> {
        self.project
            .iter()
            .chain(self.repository.iter())
            .filter(|d| !d.primary.is_resolved())
    }

    /// Plain-text report, one block per dependency
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", SEPARATOR);
        let _ = writeln!(out, " Dependency report.  [R]:Resolved [N]:Not resolved");

        let groups = [("PROJECT", &self.project), ("REPOSITORY", &self.repository)];
        for (title, dependencies) in groups {
            if dependencies.is_empty() {
                continue;
            }
            let _ = writeln!(out, "{}", SEPARATOR);
            let _ = writeln!(out, " {} Dependencies", title);
            let _ = writeln!(out, "{}", SEPARATOR);
            for dependency in dependencies {
                render_dependency(&mut out, dependency);
            }
        }
        let _ = writeln!(out, "{}", SEPARATOR);
        out
    }
}

fn render_dependency(out: &mut String, dependency: &Dependency) {
    let primary = &dependency.primary;
    let _ = writeln!(
        out,
        " {}{}  {}",
        primary.status_marker(),
        primary.coordinate.scope.marker(),
        primary.coordinate
    );
    for companion in [&dependency.sources, &dependency.javadoc].into_iter().flatten() {
        render_companion(out, companion);
    }
    out.push('\n');
}

fn render_companion(out: &mut String, artifact: &ResolvedArtifact) {
    let _ = writeln!(out, "  {}    {}", artifact.status_marker(), artifact.coordinate);
}
