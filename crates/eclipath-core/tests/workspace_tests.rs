//! Workspace preferences, resolution reports and library cleanup

mod common;

use common::{dependency, project_manifest, repository_manifest};
use eclipath_core::{CapturingReporter, Error, RunOptions, Session};
use eclipath_test_utils::TestProject;

#[test]
fn configure_workspace_sets_variable_once() {
    let project = TestProject::new();
    project.init_workspace();
    project.write_manifest(&repository_manifest(&project, ""));
    let session = Session::open(&project.root()).unwrap();

    assert!(session.configure_workspace().unwrap());
    assert!(!session.configure_workspace().unwrap());
    assert!(
        project
            .read_workspace_prefs()
            .contains("org.eclipse.jdt.core.classpathVariable.M2_REPO="),
        "{}",
        project.read_workspace_prefs()
    );

    // The configured variable now satisfies a repository-policy sync
    project.install_library("org.example", "foo", "1.0", false, false);
    let foo = dependency("org.example", "foo", "1.0");
    project.write_manifest(&repository_manifest(&project, &foo));
    let report = Session::open(&project.root())
        .unwrap()
        .sync(RunOptions::default(), &CapturingReporter::new())
        .unwrap();
    assert!(report.written);
}

#[test]
fn configure_workspace_without_workspace_fails() {
    let project = TestProject::new();
    project.write_manifest(&repository_manifest(&project, ""));
    let session = Session::open(&project.root()).unwrap();

    assert!(matches!(
        session.configure_workspace(),
        Err(Error::WorkspaceNotFound { .. })
    ));
}

#[test]
fn open_without_manifest_is_a_config_error() {
    let project = TestProject::new();
    assert!(matches!(Session::open(&project.root()), Err(Error::Config { .. })));
}

#[test]
fn open_reads_json_manifest_when_toml_is_absent() {
    let project = TestProject::new();
    let local = project.repository().to_string_lossy().replace('\\', "/");
    project.write_file(
        "eclipath.json",
        &format!(
            r#"{{"repository": {{"local": "{}"}}, "dependencies": [{{"group": "org.example", "artifact": "foo", "version": "1.0"}}]}}"#,
            local
        ),
    );

    let session = Session::open(&project.root()).unwrap();
    let dependencies = &session.manifest().dependencies;
    assert_eq!(dependencies.len(), 1);
    assert_eq!(dependencies[0].artifact, "foo");
}

#[test]
fn open_from_subdirectory_finds_project() {
    let project = TestProject::named("nested");
    project.write_manifest(&project_manifest(&project, ""));
    project.write_file("src/main/java/App.java", "class App {}");

    let session = Session::open(&project.path("src/main/java")).unwrap();
    assert_eq!(session.project().name, "nested");
}

#[test]
fn resolution_report_lists_unresolved_dependencies() {
    let project = TestProject::new();
    project.install_library("org.example", "foo", "1.0", true, false);
    let dependencies = [
        dependency("org.example", "foo", "1.0"),
        dependency("org.example", "missing", "1.0"),
    ]
    .concat();
    project.write_manifest(&project_manifest(&project, &dependencies));

    let report = Session::open(&project.root())
        .unwrap()
        .resolution_report(false, &CapturingReporter::new())
        .unwrap();

    assert_eq!(report.project.len(), 2);
    assert!(report.repository.is_empty());
    let unresolved: Vec<&str> = report
        .unresolved()
        .map(|d| d.coordinate().artifact.as_str())
        .collect();
    assert_eq!(unresolved, vec!["missing"]);
    let rendered = report.render();
    assert!(rendered.contains("PROJECT Dependencies"), "{}", rendered);
    assert!(rendered.contains("org.example:missing"), "{}", rendered);
    project.assert_file_not_exists(".classpath");
}

#[test]
fn clean_removes_only_unclaimed_libraries() {
    let project = TestProject::new();
    project.install_library("org.example", "foo", "1.0", false, false);
    project.write_manifest(&project_manifest(&project, &dependency("org.example", "foo", "1.0")));
    project.write_file("lib/old-0.1.jar", "old");
    project.write_file("lib/README.txt", "keep me");
    project.write_file("lib-test/gone-1.0.jar", "gone");
    let session = Session::open(&project.root()).unwrap();
    let reporter = CapturingReporter::new();
    session.sync(RunOptions::default(), &reporter).unwrap();

    let stale = session.stale_files(&reporter).unwrap();
    let names: Vec<&str> = stale.iter().filter_map(|p| p.file_name()).collect();
    assert_eq!(names, vec!["old-0.1.jar", "gone-1.0.jar"]);

    let report = session.clean(&reporter).unwrap();
    assert_eq!(report.removed.len(), 2);
    assert!(report.failed.is_empty());
    project.assert_file_exists("lib/foo-1.0.jar");
    project.assert_file_exists("lib/README.txt");
    project.assert_file_not_exists("lib/old-0.1.jar");
    project.assert_file_not_exists("lib-test");
}

#[test]
fn clean_is_a_no_op_under_repository_policy() {
    let project = TestProject::new();
    project.write_manifest(&repository_manifest(&project, ""));
    project.write_file("lib/old-0.1.jar", "old");

    let report = Session::open(&project.root())
        .unwrap()
        .clean(&CapturingReporter::new())
        .unwrap();

    assert!(report.removed.is_empty());
    project.assert_file_exists("lib/old-0.1.jar");
}
