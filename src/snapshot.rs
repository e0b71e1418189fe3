//! Loading person-record snapshots from JSON.
//!
//! Stands in for the data-fetching layer: both collections are read before
//! anything is built, so the core only ever sees one complete snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::{BuildOptions, OrgChart, PersonRecord};
use crate::errors::{OrgError, OrgResult};

pub const EMPLOYEES_FILE: &str = "employees.json";
pub const EMPLOYERS_FILE: &str = "employers.json";

/// Employees and employers of one organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordSnapshot {
    pub employees: Vec<PersonRecord>,
    pub employers: Vec<PersonRecord>,
}

impl RecordSnapshot {
    pub fn new(employees: Vec<PersonRecord>, employers: Vec<PersonRecord>) -> Self {
        Self {
            employees,
            employers,
        }
    }

    /// Reads two JSON arrays of person records.
    #[instrument(level = "debug")]
    pub fn load(employees_path: &Path, employers_path: &Path) -> OrgResult<Self> {
        let employees = read_records(employees_path)?;
        let employers = read_records(employers_path)?;
        debug!(
            employees = employees.len(),
            employers = employers.len(),
            "loaded snapshot"
        );
        Ok(Self::new(employees, employers))
    }

    /// Reads `employees.json` and `employers.json` from `dir`.
    pub fn load_dir(dir: &Path) -> OrgResult<Self> {
        let (employees, employers) = (dir.join(EMPLOYEES_FILE), dir.join(EMPLOYERS_FILE));
        for path in [&employees, &employers] {
            if !path.is_file() {
                return Err(OrgError::SnapshotNotFound(path.clone()));
            }
        }
        Self::load(&employees, &employers)
    }

    /// Reads one document of the form `{"employees": [...], "employers": [...]}`.
    #[instrument(level = "debug")]
    pub fn load_combined(path: &Path) -> OrgResult<Self> {
        let content = read(path)?;
        serde_json::from_str(&content).map_err(|source| OrgError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn build(&self, options: &BuildOptions) -> OrgChart {
        OrgChart::build(&self.employees, &self.employers, options)
    }
}

fn read(path: &Path) -> OrgResult<String> {
    fs::read_to_string(path).map_err(|source| OrgError::Io {
        path: PathBuf::from(path),
        source,
    })
}

fn read_records(path: &Path) -> OrgResult<Vec<PersonRecord>> {
    let content = read(path)?;
    serde_json::from_str(&content).map_err(|source| OrgError::Json {
        path: path.to_path_buf(),
        source,
    })
}
