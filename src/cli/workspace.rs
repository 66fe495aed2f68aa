//! Snapshot loading and persistence shared by the commands
//!
//! A command loads one snapshot, runs a single transition against it and
//! writes back only the records that changed.

use std::path::{Path, PathBuf};

use crate::config::load_config;
use crate::domain::{normalize_records, TransitionResult, ValidationContext};
use crate::errors::{Result, ShiftcertError};
use crate::fs::{find_data_root, read_templates, resolve_cwd, JsonAttemptStore, JsonRecordStore};
use crate::schemas::{Config, RecordSet, TemplateCatalog, TestAttempts, TraineeRecord};
use crate::store::{persist_changes, RecordStore, TestAttemptStore};

/// Everything a command needs from the data directory
#[derive(Debug)]
pub struct Workspace {
    pub root: PathBuf,
    pub config: Config,
    pub templates: TemplateCatalog,
    pub attempts: TestAttempts,
    pub records: RecordSet,
    store: JsonRecordStore,
}

impl Workspace {
    /// Locate the data directory from `cwd` and load a snapshot
    pub fn open(cwd: Option<&Path>) -> Result<Self> {
        let root = find_data_root(&resolve_cwd(cwd))?;
        let config = load_config(&root)?;
        let templates = read_templates(&root)?;
        let attempts = JsonAttemptStore::new(&root).get_all()?;
        let store = JsonRecordStore::new(&root);
        let records = normalize_records(&store.get_all()?);

        tracing::debug!(
            root = %root.display(),
            trainees = records.len(),
            templates = templates.len(),
            "workspace opened"
        );

        Ok(Workspace {
            root,
            config,
            templates,
            attempts,
            records,
            store,
        })
    }

    pub fn ctx(&self) -> ValidationContext<'_> {
        ValidationContext::new(&self.config, &self.templates, &self.attempts)
    }

    pub fn record(&self, id: &str) -> Result<&TraineeRecord> {
        self.records
            .get(id)
            .ok_or_else(|| ShiftcertError::TraineeNotFound(id.to_string()))
    }

    /// Persist an applied transition, or turn a rejection into an error.
    pub fn commit(&mut self, result: TransitionResult) -> Result<()> {
        let next = match result {
            TransitionResult::Applied { records } => records,
            TransitionResult::Rejected { reason, .. } => {
                return Err(ShiftcertError::TransitionRejected(reason));
            }
        };

        let report = persist_changes(&mut self.store, &self.records, &next);
        self.records = next;
        if !report.is_success() {
            let failed: Vec<String> = report
                .failed
                .iter()
                .map(|(id, message)| format!("{} ({})", id, message))
                .collect();
            return Err(ShiftcertError::Wrapped {
                context: "Failed to persist".to_string(),
                message: failed.join(", "),
            });
        }
        Ok(())
    }

    pub fn save_attempts(&mut self, attempts: TestAttempts) -> Result<()> {
        JsonAttemptStore::new(&self.root).put_all(&attempts)?;
        self.attempts = attempts;
        Ok(())
    }
}

/// Print a value as pretty JSON
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| ShiftcertError::InvalidJson(e.to_string()))?;
    println!("{}", out);
    Ok(())
}
