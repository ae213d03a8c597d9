//! CLI end-to-end tests that invoke the compiled `eclipath` binary.

use assert_cmd::Command;
use eclipath_test_utils::TestProject;
use predicates::prelude::*;

fn eclipath(project: &TestProject) -> Command {
    let mut cmd = Command::cargo_bin("eclipath").unwrap();
    cmd.current_dir(project.root())
        .env_remove("ECLIPATH_PROJECT")
        .env("NO_COLOR", "1");
    cmd
}

fn manifest(project: &TestProject, policy: &str, dependencies: &str) -> String {
    format!(
        "{}\n[classpath]\npolicy = \"{}\"\nsources = false\njavadoc = false\n\n{}",
        project.repository_toml(),
        policy,
        dependencies
    )
}

const FOO: &str = "[[dependencies]]\ngroup = \"org.example\"\nartifact = \"foo\"\nversion = \"1.0\"\n\n";
const MISSING: &str = "[[dependencies]]\ngroup = \"org.example\"\nartifact = \"missing\"\nversion = \"1.0\"\n\n";

#[test]
fn help_lists_commands() {
    let project = TestProject::new();
    eclipath(&project)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("check-clean"))
        .stdout(predicate::str::contains("configure-workspace"));
}

#[test]
fn no_command_prints_hint() {
    let project = TestProject::new();
    eclipath(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("eclipath --help"));
}

#[test]
fn missing_manifest_is_an_error() {
    let project = TestProject::new();
    eclipath(&project)
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("eclipath.toml"));
}

#[test]
fn sync_writes_classpath_then_reports_up_to_date() {
    let project = TestProject::new();
    project.install_library("org.example", "foo", "1.0", false, false);
    project.write_manifest(&manifest(&project, "project", FOO));

    eclipath(&project)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added lib lib/foo-1.0.jar"));
    project.assert_file_contains(".classpath", r#"path="lib/foo-1.0.jar""#);
    project.assert_file_exists("lib/foo-1.0.jar");

    eclipath(&project)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));
}

#[test]
fn sync_dry_run_leaves_project_alone() {
    let project = TestProject::new();
    project.install_library("org.example", "foo", "1.0", false, false);
    project.write_manifest(&manifest(&project, "project", FOO));

    eclipath(&project)
        .args(["sync", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[dry-run] Would add lib lib/foo-1.0.jar"));
    project.assert_file_not_exists(".classpath");
    project.assert_file_not_exists("lib");
}

#[test]
fn strict_fails_on_unresolved_dependency() {
    let project = TestProject::new();
    project.write_manifest(&manifest(&project, "project", MISSING));

    eclipath(&project)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("org.example:missing"));

    eclipath(&project)
        .args(["sync", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 dependencies could not be added"));
}

#[test]
fn sync_json_output_is_parseable() {
    let project = TestProject::new();
    project.install_library("org.example", "foo", "1.0", false, false);
    project.write_manifest(&manifest(&project, "project", FOO));

    let output = eclipath(&project).args(["sync", "--json"]).output().unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["mode"], "full");
    assert_eq!(report["added"][0]["path"], "lib/foo-1.0.jar");
    assert_eq!(report["written"], true);
}

#[test]
fn project_flag_selects_project() {
    let project = TestProject::new();
    project.install_library("org.example", "foo", "1.0", false, false);
    project.write_manifest(&manifest(&project, "project", FOO));

    Command::cargo_bin("eclipath")
        .unwrap()
        .env_remove("ECLIPATH_PROJECT")
        .current_dir(project.workspace_root())
        .args(["check", "--project"])
        .arg(project.root())
        .assert()
        .success();
    project.assert_file_exists(".classpath");
}

#[test]
fn resolve_prints_report() {
    let project = TestProject::new();
    project.install_library("org.example", "foo", "1.0", false, false);
    project.write_manifest(&manifest(&project, "project", &format!("{}{}", FOO, MISSING)));

    eclipath(&project)
        .arg("resolve")
        .assert()
        .success()
        .stdout(predicate::str::contains("PROJECT Dependencies"))
        .stdout(predicate::str::contains("1 dependencies not resolved"));
    project.assert_file_not_exists(".classpath");
}

#[test]
fn check_clean_then_clean() {
    let project = TestProject::new();
    project.write_manifest(&manifest(&project, "project", ""));
    project.write_file("lib/old-0.1.jar", "old");

    eclipath(&project)
        .arg("check-clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("lib/old-0.1.jar"));
    project.assert_file_exists("lib/old-0.1.jar");

    eclipath(&project).arg("clean").assert().success();
    project.assert_file_not_exists("lib/old-0.1.jar");
}

#[test]
fn configure_workspace_writes_variable() {
    let project = TestProject::new();
    project.init_workspace();
    project.write_manifest(&manifest(&project, "repository", ""));

    eclipath(&project)
        .arg("configure-workspace")
        .assert()
        .success()
        .stdout(predicate::str::contains("M2_REPO"));
    assert!(
        project
            .read_workspace_prefs()
            .contains("org.eclipse.jdt.core.classpathVariable.M2_REPO=")
    );
}

#[test]
fn unconfigured_variable_fails_sync() {
    let project = TestProject::new();
    project.init_workspace();
    project.install_library("org.example", "foo", "1.0", false, false);
    project.write_manifest(&manifest(&project, "repository", FOO));

    eclipath(&project)
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("M2_REPO"));
    project.assert_file_not_exists(".classpath");
}

#[test]
fn refresh_failure_is_only_a_warning() {
    let project = TestProject::new();
    project.write_manifest(&format!(
        "{}\n[refresh]\nhost = \"127.0.0.1\"\nport = 9\n",
        manifest(&project, "project", "")
    ));

    eclipath(&project)
        .arg("refresh")
        .assert()
        .success()
        .stdout(predicate::str::contains("IDE refresh failed"));
}
