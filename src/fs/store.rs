//! File-backed implementations of the persistence collaborators
//!
//! Each trainee lives in its own `trainees/<id>.json`; attempts and rosters
//! are single files under the data directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{Result, ShiftcertError};
use crate::schemas::{RecordSet, Roster, TestAttempts, TraineeRecord};
use crate::store::{RecordStore, RosterSource, TestAttemptStore};

use super::json::{read_attempts, read_json, read_rosters, write_attempts, write_json};
use super::paths::{get_trainee_path, get_trainees_dir};

/// Trainee records stored as one JSON file per trainee
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    root: PathBuf,
}

impl JsonRecordStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        JsonRecordStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl RecordStore for JsonRecordStore {
    fn get(&self, id: &str) -> Result<Option<TraineeRecord>> {
        match read_json(&get_trainee_path(&self.root, id)?) {
            Ok(record) => Ok(Some(record)),
            Err(ShiftcertError::FileNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn get_all(&self) -> Result<RecordSet> {
        let dir = get_trainees_dir(&self.root);
        let mut records = RecordSet::new();
        if !dir.exists() {
            return Ok(records);
        }

        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            // An unreadable record fails the load so nothing can overwrite it
            let record: TraineeRecord = read_json(&path).map_err(|e| {
                tracing::warn!(path = %path.display(), error = %e, "unreadable trainee record");
                e
            })?;
            records.insert(record.id.clone(), record);
        }

        tracing::debug!(count = records.len(), "loaded trainee records");
        Ok(records)
    }

    fn put(&mut self, id: &str, record: &TraineeRecord) -> Result<()> {
        write_json(&get_trainee_path(&self.root, id)?, record)
    }
}

/// Test attempts stored in `test_attempts.json`
#[derive(Debug, Clone)]
pub struct JsonAttemptStore {
    root: PathBuf,
}

impl JsonAttemptStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        JsonAttemptStore { root: root.into() }
    }
}

impl TestAttemptStore for JsonAttemptStore {
    fn get_all(&self) -> Result<TestAttempts> {
        read_attempts(&self.root)
    }

    fn put_all(&mut self, attempts: &TestAttempts) -> Result<()> {
        write_attempts(&self.root, attempts)
    }
}

/// Rosters read from `roster.json`
#[derive(Debug, Clone)]
pub struct JsonRosterSource {
    root: PathBuf,
}

impl JsonRosterSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        JsonRosterSource { root: root.into() }
    }
}

impl RosterSource for JsonRosterSource {
    fn roster(&self, store: &str) -> Result<Option<Roster>> {
        Ok(read_rosters(&self.root)?
            .into_iter()
            .find(|r| r.store == store))
    }
}
