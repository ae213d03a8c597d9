use eclipath_fs::{ConfigStore, Error, NormalizedPath};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct TestConfig {
    policy: String,
    exclude_scopes: Vec<String>,
}

#[test]
fn test_load_toml() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("eclipath.toml");
    fs::write(
        &file_path,
        r#"policy = "project"
exclude_scopes = ["provided"]"#,
    )
    .unwrap();

    let config: TestConfig = ConfigStore::new()
        .load(&NormalizedPath::new(&file_path))
        .unwrap();

    assert_eq!(config.policy, "project");
    assert_eq!(config.exclude_scopes, vec!["provided".to_string()]);
}

#[test]
fn test_load_json() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("eclipath.json");
    fs::write(&file_path, r#"{"policy": "repository", "exclude_scopes": []}"#).unwrap();

    let config: TestConfig = ConfigStore::new()
        .load(&NormalizedPath::new(&file_path))
        .unwrap();

    assert_eq!(config.policy, "repository");
}

#[test]
fn test_save_then_load_toml() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("eclipath.toml"));
    let store = ConfigStore::new();
    let config = TestConfig {
        policy: "project".into(),
        exclude_scopes: vec!["test".into()],
    };

    store.save(&path, &config).unwrap();
    let loaded: TestConfig = store.load(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_invalid_toml_reports_parse_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("eclipath.toml");
    fs::write(&file_path, "policy = [unclosed").unwrap();

    let result: eclipath_fs::Result<TestConfig> =
        ConfigStore::new().load(&NormalizedPath::new(&file_path));

    assert!(matches!(result, Err(Error::ConfigParse { .. })));
}

#[test]
fn test_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("eclipath.ini");
    fs::write(&file_path, "policy=project").unwrap();

    let result: eclipath_fs::Result<TestConfig> =
        ConfigStore::new().load(&NormalizedPath::new(&file_path));

    assert!(matches!(result, Err(Error::UnsupportedFormat { .. })));
}
