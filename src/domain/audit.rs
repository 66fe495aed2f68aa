//! Per-shift audit trail, reconstructed from the timestamped slot and
//! checklist fields. Nothing is stored separately.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::schemas::{ShiftKey, TraineeRecord};

/// What happened
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditEvent {
    ScheduleSet { when: DateTime<Utc> },
    ClaimRequested { trainer: String },
    TrainerAssigned { trainer: String, via_claim: bool },
    ChecklistItemRecorded { item: String },
    TrainerSigned,
    ManagerSigned,
}

/// One entry in a shift's audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    pub at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(flatten)]
    pub event: AuditEvent,
}

/// Chronological audit trail of one shift. Entries with equal timestamps keep
/// workflow order.
pub fn shift_audit_trail(record: &TraineeRecord, shift: ShiftKey) -> Vec<AuditEntry> {
    let mut entries = Vec::new();

    if let Some(slot) = record.slot(shift) {
        if let (Some(at), Some(when)) = (slot.schedule_set_at, slot.when) {
            entries.push(AuditEntry {
                at,
                actor: None,
                event: AuditEvent::ScheduleSet { when },
            });
        }

        for claim in slot.approved_claim.iter().chain(slot.pending_claim.iter()) {
            entries.push(AuditEntry {
                at: claim.at,
                actor: Some(claim.trainer.clone()),
                event: AuditEvent::ClaimRequested {
                    trainer: claim.trainer.clone(),
                },
            });
        }

        if let (Some(at), Some(trainer)) = (slot.assigned_at, &slot.trainer) {
            entries.push(AuditEntry {
                at,
                actor: None,
                event: AuditEvent::TrainerAssigned {
                    trainer: trainer.clone(),
                    via_claim: slot.approved_claim.is_some(),
                },
            });
        }

        if let Some(at) = slot.trainer_signed_at {
            entries.push(AuditEntry {
                at,
                actor: slot.trainer_signed_by.clone(),
                event: AuditEvent::TrainerSigned,
            });
        }

        if let Some(at) = slot.manager_signed_at {
            entries.push(AuditEntry {
                at,
                actor: slot.manager_signed_by.clone(),
                event: AuditEvent::ManagerSigned,
            });
        }
    }

    if let Some(checklist) = record.checklist(shift) {
        for (item, entry) in &checklist.items {
            entries.push(AuditEntry {
                at: entry.at,
                actor: Some(entry.author.clone()),
                event: AuditEvent::ChecklistItemRecorded { item: item.clone() },
            });
        }
    }

    // stable sort keeps insertion (workflow) order for equal timestamps
    entries.sort_by_key(|e| e.at);
    entries
}
