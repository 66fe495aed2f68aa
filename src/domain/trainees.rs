//! Trainee lifecycle and schedule edits

use chrono::{DateTime, Utc};

use crate::schemas::{
    is_valid_employee_number, trainee_id, Note, RecordSet, ShiftKey, TraineeRecord, VerbalCert,
};

use super::transitions::{reject, update_record, TransitionResult};

/// Add a new trainee. Refused if the derived id is already taken.
pub fn add_trainee(
    records: &RecordSet,
    store: &str,
    employee_number: &str,
    name: &str,
    now: DateTime<Utc>,
) -> TransitionResult {
    if store.trim().is_empty() || employee_number.trim().is_empty() || name.trim().is_empty() {
        return reject(records, "store, employee number and name are required".to_string());
    }
    if !is_valid_employee_number(employee_number) {
        return reject(
            records,
            format!(
                "employee number '{}' may only contain letters, digits and dashes",
                employee_number.trim()
            ),
        );
    }
    let id = trainee_id(store, employee_number);
    if let Some(existing) = records.get(&id) {
        let state = if existing.archived { "archived " } else { "" };
        return reject(records, format!("{}trainee '{}' already exists", state, id));
    }

    let mut next = records.clone();
    next.insert(id, TraineeRecord::new(store, employee_number, name, now));
    TransitionResult::Applied { records: next }
}

/// Soft-delete a trainee
pub fn archive_trainee(records: &RecordSet, trainee_id: &str) -> TransitionResult {
    update_record(records, trainee_id, |mut record| {
        if record.archived {
            return Err(format!("trainee '{}' is already archived", record.id));
        }
        record.archived = true;
        Ok(record)
    })
}

/// Start a trainee over: clear schedule, checklists and the cached
/// certification flag. Identity, notes, feedback and any legacy
/// certification are kept.
pub fn restart_trainee(records: &RecordSet, trainee_id: &str) -> TransitionResult {
    update_record(records, trainee_id, |mut record| {
        record.schedule.clear();
        record.checklists.clear();
        record.certified = None;
        record.certified_at = None;
        Ok(record)
    })
}

/// Append a note
pub fn add_note(
    records: &RecordSet,
    trainee_id: &str,
    text: &str,
    author: &str,
    now: DateTime<Utc>,
) -> TransitionResult {
    update_record(records, trainee_id, |record| {
        if text.trim().is_empty() {
            return Err("note text is empty".to_string());
        }
        Ok(record.with_note(Note {
            text: text.trim().to_string(),
            at: now,
            author: author.to_string(),
        }))
    })
}

/// Record a legacy manual certification
pub fn record_verbal_cert(
    records: &RecordSet,
    trainee_id: &str,
    by: &str,
    now: DateTime<Utc>,
) -> TransitionResult {
    update_record(records, trainee_id, |mut record| {
        if record.verbal_cert.as_ref().is_some_and(|v| v.completed) {
            return Err(format!("trainee '{}' is already verbally certified", record.id));
        }
        record.verbal_cert = Some(VerbalCert {
            completed: true,
            by: Some(by.to_string()),
            at: Some(now),
        });
        Ok(record)
    })
}

/// Edit the `when`/`trainer` pair of a slot.
///
/// Setting a trainer is a direct assignment and drops any pending claim, as
/// does clearing the date.
/// Refused once the trainer has signed off.
pub fn schedule_shift(
    records: &RecordSet,
    trainee_id: &str,
    shift: ShiftKey,
    when: Option<DateTime<Utc>>,
    trainer: Option<&str>,
    now: DateTime<Utc>,
) -> TransitionResult {
    update_record(records, trainee_id, |record| {
        let mut slot = record.slot(shift).cloned().unwrap_or_default();
        if slot.is_trainer_signed() {
            return Err(format!("{} is already signed and cannot be rescheduled", shift));
        }
        if slot.when == when && slot.trainer.as_deref() == trainer {
            return Err(format!("{} schedule is unchanged", shift));
        }

        if slot.when != when {
            slot.when = when;
            slot.schedule_set_at = Some(now);
        }
        if slot.when.is_none() {
            slot.pending_claim = None;
        }
        if slot.trainer.as_deref() != trainer {
            slot.trainer = trainer.map(str::to_string);
            slot.assigned_at = trainer.map(|_| now);
            slot.approved_claim = None;
            if trainer.is_some() {
                slot.pending_claim = None;
            }
        }
        Ok(record.with_slot(shift, slot))
    })
}
