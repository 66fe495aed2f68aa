//! Transition plumbing shared by every workflow mutation
//!
//! Transitions are pure functions from a record set to a new record set.
//! A refused transition hands back the unchanged input with a reason.

use crate::schemas::{RecordSet, TraineeRecord};

/// Result of a transition attempt
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionResult {
    /// The transition was applied
    Applied {
        /// The new record set; the caller persists it
        records: RecordSet,
    },
    /// A precondition failed; nothing changed
    Rejected {
        /// The input record set, unmodified
        records: RecordSet,
        /// Why the transition was refused
        reason: String,
    },
}

impl TransitionResult {
    /// Check if the transition was applied
    pub fn is_applied(&self) -> bool {
        matches!(self, TransitionResult::Applied { .. })
    }

    /// Check if the transition was refused
    pub fn is_rejected(&self) -> bool {
        matches!(self, TransitionResult::Rejected { .. })
    }

    /// Borrow the resulting record set (unchanged input when rejected)
    pub fn records(&self) -> &RecordSet {
        match self {
            TransitionResult::Applied { records } | TransitionResult::Rejected { records, .. } => {
                records
            }
        }
    }

    /// Take the resulting record set (unchanged input when rejected)
    pub fn into_records(self) -> RecordSet {
        match self {
            TransitionResult::Applied { records } | TransitionResult::Rejected { records, .. } => {
                records
            }
        }
    }

    /// Get the rejection reason, if any
    pub fn reason(&self) -> Option<&str> {
        match self {
            TransitionResult::Applied { .. } => None,
            TransitionResult::Rejected { reason, .. } => Some(reason),
        }
    }
}

/// Apply `change` to one trainee's record.
///
/// `change` receives a clone of the record and either returns the new record
/// or a reason to refuse. The input set is never modified.
pub(crate) fn update_record<F>(records: &RecordSet, trainee_id: &str, change: F) -> TransitionResult
where
    F: FnOnce(TraineeRecord) -> Result<TraineeRecord, String>,
{
    let Some(record) = records.get(trainee_id) else {
        return reject(records, format!("no trainee with id '{}'", trainee_id));
    };

    match change(record.clone()) {
        Ok(next) => {
            let mut next_records = records.clone();
            next_records.insert(trainee_id.to_string(), next);
            TransitionResult::Applied {
                records: next_records,
            }
        }
        Err(reason) => reject(records, reason),
    }
}

pub(crate) fn reject(records: &RecordSet, reason: String) -> TransitionResult {
    tracing::debug!(%reason, "transition rejected");
    TransitionResult::Rejected {
        records: records.clone(),
        reason,
    }
}
