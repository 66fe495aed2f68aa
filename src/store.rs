//! Persistence collaborators
//!
//! The engine never persists; callers take the `RecordSet` returned by a
//! transition and hand the changed records to a `RecordStore`. Writes are
//! whole-record and last-write-wins.

use std::collections::BTreeMap;

use crate::errors::Result;
use crate::schemas::{RecordSet, Roster, TestAttempts, TraineeRecord};

/// Durable mapping from trainee id to record
pub trait RecordStore {
    fn get(&self, id: &str) -> Result<Option<TraineeRecord>>;

    fn get_all(&self) -> Result<RecordSet>;

    fn put(&mut self, id: &str, record: &TraineeRecord) -> Result<()>;
}

/// Source of knowledge test attempts
pub trait TestAttemptStore {
    fn get_all(&self) -> Result<TestAttempts>;

    fn put_all(&mut self, attempts: &TestAttempts) -> Result<()>;
}

/// Source of trainer rosters, e.g. an import from the point-of-sale system
pub trait RosterSource {
    fn roster(&self, store: &str) -> Result<Option<Roster>>;
}

/// Outcome of writing a snapshot back to a store
#[derive(Debug, Default)]
pub struct PersistReport {
    /// Ids written successfully
    pub written: Vec<String>,
    /// Ids whose write failed, with the error message
    pub failed: Vec<(String, String)>,
}

impl PersistReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Write every record in `after` that differs from `before`.
///
/// Failures are collected rather than aborting; `after` stays the source of
/// truth and the caller may retry the persist step alone.
pub fn persist_changes<S: RecordStore + ?Sized>(
    store: &mut S,
    before: &RecordSet,
    after: &RecordSet,
) -> PersistReport {
    let mut report = PersistReport::default();
    for (id, record) in after {
        if before.get(id) == Some(record) {
            continue;
        }
        match store.put(id, record) {
            Ok(()) => {
                tracing::info!(trainee = %id, "record persisted");
                report.written.push(id.clone());
            }
            Err(e) => {
                tracing::warn!(trainee = %id, error = %e, "failed to persist record");
                report.failed.push((id.clone(), e.to_string()));
            }
        }
    }
    report
}

/// In-memory record store
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: RecordSet,
}

impl MemoryRecordStore {
    pub fn new(records: RecordSet) -> Self {
        MemoryRecordStore { records }
    }
}

impl RecordStore for MemoryRecordStore {
    fn get(&self, id: &str) -> Result<Option<TraineeRecord>> {
        Ok(self.records.get(id).cloned())
    }

    fn get_all(&self) -> Result<RecordSet> {
        Ok(self.records.clone())
    }

    fn put(&mut self, id: &str, record: &TraineeRecord) -> Result<()> {
        self.records.insert(id.to_string(), record.clone());
        Ok(())
    }
}

/// In-memory attempt store
#[derive(Debug, Clone, Default)]
pub struct MemoryAttemptStore {
    attempts: TestAttempts,
}

impl MemoryAttemptStore {
    pub fn new(attempts: TestAttempts) -> Self {
        MemoryAttemptStore { attempts }
    }
}

impl TestAttemptStore for MemoryAttemptStore {
    fn get_all(&self) -> Result<TestAttempts> {
        Ok(self.attempts.clone())
    }

    fn put_all(&mut self, attempts: &TestAttempts) -> Result<()> {
        self.attempts = attempts.clone();
        Ok(())
    }
}

/// In-memory roster source
#[derive(Debug, Clone, Default)]
pub struct MemoryRosterSource {
    rosters: BTreeMap<String, Roster>,
}

impl MemoryRosterSource {
    pub fn new(rosters: impl IntoIterator<Item = Roster>) -> Self {
        MemoryRosterSource {
            rosters: rosters.into_iter().map(|r| (r.store.clone(), r)).collect(),
        }
    }
}

impl RosterSource for MemoryRosterSource {
    fn roster(&self, store: &str) -> Result<Option<Roster>> {
        Ok(self.rosters.get(store).cloned())
    }
}
