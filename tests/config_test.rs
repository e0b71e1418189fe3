//! Integration tests for Settings layered loading.
//!
//! These tests pass the global config location explicitly, so they never
//! read the user's real configuration.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use orgtree::config::Settings;
use orgtree::domain::UNASSIGNED;
use orgtree::errors::OrgError;

#[test]
fn given_no_config_files_when_loading_then_defaults() {
    let settings = Settings::load_from(None, None).expect("load settings");

    assert_eq!(settings.unassigned_label, UNASSIGNED);
    assert_eq!(settings.root_label, "Organization");
    assert!(settings.search.match_position);
    assert_eq!(settings.build_options().root_label, "Organization");
}

#[test]
fn given_global_and_explicit_config_when_loading_then_explicit_wins() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("global.toml");
    let local = dir.path().join("local.toml");
    fs::write(
        &global,
        r#"
root_label = "Acme Corp"
unassigned_label = "Floating"
"#,
    )
    .unwrap();
    fs::write(
        &local,
        r#"
unassigned_label = "No Department"
data_dir = "/srv/hr/snapshots"

[search]
match_position = false
"#,
    )
    .unwrap();

    let settings = Settings::load_from(Some(global.as_path()), Some(local.as_path()))
        .expect("load settings");

    assert_eq!(settings.root_label, "Acme Corp");
    assert_eq!(settings.unassigned_label, "No Department");
    assert_eq!(settings.data_dir, Some(PathBuf::from("/srv/hr/snapshots")));
    assert!(!settings.search_options().match_position);
}

#[test]
fn given_missing_explicit_config_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let result = Settings::load_from(None, Some(missing.as_path()));

    assert!(matches!(result, Err(OrgError::Config { .. })));
}

#[test]
fn given_invalid_toml_when_loading_then_config_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "root_label = [unclosed").unwrap();

    let err = Settings::load_from(Some(path.as_path()), None).unwrap_err();

    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn given_default_settings_when_serializing_then_toml_has_search_table() {
    let settings = Settings::default();
    let text = settings.to_toml().expect("serialize");
    assert!(text.contains("root_label = \"Organization\""));
    assert!(text.contains("[search]"));
}
