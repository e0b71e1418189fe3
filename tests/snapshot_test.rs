//! Tests for loading person-record snapshots from JSON files

use std::fs;

use tempfile::TempDir;

use orgtree::domain::BuildOptions;
use orgtree::errors::OrgError;
use orgtree::snapshot::{RecordSnapshot, EMPLOYEES_FILE, EMPLOYERS_FILE};
use orgtree::util::testing;

const EMPLOYEES: &str = r#"[
  {"id": 2, "name": "Bob", "managerId": 1, "position": "Engineer", "salary": 5000.0},
  {"id": 3, "name": "Cid", "managerId": 2, "title": "Intern", "status": "active"}
]"#;

const EMPLOYERS: &str = r#"[
  {"id": 1, "name": "Ann", "managerId": null, "department": "Exec", "email": "ann@example.com"}
]"#;

fn write_snapshot_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(EMPLOYEES_FILE), EMPLOYEES).unwrap();
    fs::write(dir.path().join(EMPLOYERS_FILE), EMPLOYERS).unwrap();
    dir
}

#[test]
fn given_data_dir_when_loading_then_builds_single_rooted_chart() {
    testing::init_test_setup();
    let dir = write_snapshot_dir();

    let snapshot = RecordSnapshot::load_dir(dir.path()).expect("load snapshot");
    let chart = snapshot.build(&BuildOptions::default());

    assert_eq!(snapshot.employees.len(), 2);
    assert_eq!(snapshot.employers.len(), 1);
    assert_eq!(snapshot.employees[1].position, "Intern");
    assert_eq!(snapshot.employees[0].payload.salary, Some(5000.0));
    assert_eq!(chart.root().id, 1);
    assert_eq!(chart.depth(), 3);
    assert_eq!(chart.departments()[0].employee_count, 3);
    assert_eq!(chart.index().len(), 3);
}

#[test]
fn given_combined_document_when_loading_then_both_collections_read() {
    testing::init_test_setup();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("org.json");
    fs::write(
        &path,
        format!(r#"{{"employees": {EMPLOYEES}, "employers": {EMPLOYERS}}}"#),
    )
    .unwrap();

    let snapshot = RecordSnapshot::load_combined(&path).expect("load combined");

    assert_eq!(snapshot.employees.len(), 2);
    assert_eq!(snapshot.employers[0].declared_department(), Some("Exec"));
}

#[test]
fn given_missing_employers_file_when_loading_dir_then_snapshot_not_found() {
    testing::init_test_setup();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(EMPLOYEES_FILE), EMPLOYEES).unwrap();

    let result = RecordSnapshot::load_dir(dir.path());

    assert!(matches!(result, Err(OrgError::SnapshotNotFound(p)) if p.ends_with(EMPLOYERS_FILE)));
}

#[test]
fn given_malformed_json_when_loading_then_json_error_names_file() {
    testing::init_test_setup();
    let dir = write_snapshot_dir();
    let broken = dir.path().join(EMPLOYEES_FILE);
    fs::write(&broken, r#"[{"id": "not-a-number", "name": "x"}]"#).unwrap();

    let err = RecordSnapshot::load_dir(dir.path()).unwrap_err();

    match err {
        OrgError::Json { path, .. } => assert_eq!(path, broken),
        other => panic!("expected json error, got {other:?}"),
    }
}
