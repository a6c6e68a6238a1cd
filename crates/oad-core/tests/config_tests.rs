use std::fs;

use oad_core::IssueKind;
use oad_core::config::{CONFIG_FILE_NAME, OadConfig, default_config_content, load_config};
use oad_core::error::ConfigError;

#[test]
fn load_config_from_project_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(
        &path,
        r#"
input: specs/gorila.yaml
validation:
  deny_warnings: true
  suppress: [missing_description]
navigation:
  ungrouped: More
"#,
    )
    .unwrap();

    let config = load_config(&path).unwrap().expect("config should load");
    assert_eq!(config.input, "specs/gorila.yaml");
    assert!(config.validation.deny_warnings);

    let options = config.build_options();
    assert_eq!(options.suppress, vec![IssueKind::MissingDescription]);
    assert_eq!(options.default_tag, "default");
    assert_eq!(options.ungrouped, "More");
}

#[test]
fn load_config_absent_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    assert!(load_config(&path).unwrap().is_none());
}

#[test]
fn load_config_rejects_bad_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "validation: [not, a, map\n").unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn default_config_content_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, default_config_content()).unwrap();

    let loaded = load_config(&path).unwrap().unwrap();
    let defaults = OadConfig::default();
    assert_eq!(loaded.input, defaults.input);
    assert_eq!(loaded.navigation.ungrouped, defaults.navigation.ungrouped);
    assert!(loaded.validation.suppress.is_empty());
}
