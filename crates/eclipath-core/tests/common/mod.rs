#![allow(dead_code)]

//! Manifest builders shared by the integration tests

use eclipath_test_utils::TestProject;

pub fn dependency(group: &str, artifact: &str, version: &str) -> String {
    format!(
        "[[dependencies]]\ngroup = \"{}\"\nartifact = \"{}\"\nversion = \"{}\"\n\n",
        group, artifact, version
    )
}

pub fn scoped_dependency(group: &str, artifact: &str, version: &str, scope: &str) -> String {
    format!(
        "[[dependencies]]\ngroup = \"{}\"\nartifact = \"{}\"\nversion = \"{}\"\nscope = \"{}\"\n\n",
        group, artifact, version, scope
    )
}

/// Project-local placement, sources only
pub fn project_manifest(project: &TestProject, dependencies: &str) -> String {
    format!(
        "{}\n[classpath]\npolicy = \"project\"\njavadoc = false\n\n{}",
        project.repository_toml(),
        dependencies
    )
}

/// Shared-repository placement through `M2_REPO`
pub fn repository_manifest(project: &TestProject, dependencies: &str) -> String {
    format!(
        "{}\n[classpath]\npolicy = \"repository\"\njavadoc = false\n\n{}",
        project.repository_toml(),
        dependencies
    )
}
