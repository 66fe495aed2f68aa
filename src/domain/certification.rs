//! Whole-trainee certification
//!
//! A trainee is certified when every required shift is complete, or when a
//! certification override (cached `certified` flag or legacy verbal
//! certification) is recorded.

use serde::Serialize;

use crate::schemas::{RecordSet, ShiftKey, TraineeRecord, SHIFT_KEYS};

use super::status::is_shift_complete;

/// Progress towards certification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CertificationProgress {
    pub completed: usize,
    pub required: usize,
}

impl CertificationProgress {
    pub fn is_done(&self) -> bool {
        self.completed >= self.required
    }
}

/// Whether every required shift is complete
pub fn all_required_complete(record: &TraineeRecord, required: &[ShiftKey]) -> bool {
    required.iter().all(|&shift| is_shift_complete(record, shift))
}

/// Count of required shifts that are complete
pub fn certification_progress(record: &TraineeRecord, required: &[ShiftKey]) -> CertificationProgress {
    CertificationProgress {
        completed: required
            .iter()
            .filter(|&&shift| is_shift_complete(record, shift))
            .count(),
        required: required.len(),
    }
}

/// First required shift, in canonical order, that is not complete yet
pub fn next_required_shift(record: &TraineeRecord, required: &[ShiftKey]) -> Option<ShiftKey> {
    SHIFT_KEYS
        .iter()
        .copied()
        .filter(|shift| required.contains(shift))
        .find(|&shift| !is_shift_complete(record, shift))
}

fn verbally_certified(record: &TraineeRecord) -> bool {
    record.verbal_cert.as_ref().is_some_and(|v| v.completed)
}

/// Whether the trainee is certified
pub fn is_trainee_certified(record: &TraineeRecord, required: &[ShiftKey]) -> bool {
    record.certified == Some(true) || verbally_certified(record) || all_required_complete(record, required)
}

/// Back-fill `certified` from the legacy verbal certification.
///
/// Only fills an absent flag; an explicit `false` is left alone and the
/// legacy record is never touched.
pub fn normalize_certification(record: &TraineeRecord) -> TraineeRecord {
    let mut next = record.clone();
    if next.certified.is_none() && verbally_certified(record) {
        next.certified = Some(true);
        if next.certified_at.is_none() {
            next.certified_at = record.verbal_cert.as_ref().and_then(|v| v.at);
        }
    }
    next
}

/// Normalize every record in the set
pub fn normalize_records(records: &RecordSet) -> RecordSet {
    records
        .iter()
        .map(|(id, record)| (id.clone(), normalize_certification(record)))
        .collect()
}
