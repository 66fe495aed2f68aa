//! Shift status derivation
//!
//! Pure read-side functions. Absent fields read as "not yet"; malformed data
//! is reported as found, never repaired.

use serde::Serialize;

use crate::schemas::{ShiftKey, ShiftSlot, TraineeRecord, SHIFT_KEYS};

/// Lifecycle label of a shift, in precedence order (highest first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStateLabel {
    /// Trainer and manager both signed
    Complete,
    /// Manager signature without a trainer signature; only seen in malformed data
    ManagerSignedOnly,
    /// Trainer signed, awaiting manager
    TrainerSigned,
    /// Scheduled, awaiting checklist, tests and sign-off
    Scheduled,
    NotScheduled,
}

impl std::fmt::Display for ShiftStateLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShiftStateLabel::Complete => write!(f, "complete"),
            ShiftStateLabel::ManagerSignedOnly => write!(f, "manager signed only"),
            ShiftStateLabel::TrainerSigned => write!(f, "awaiting manager"),
            ShiftStateLabel::Scheduled => write!(f, "scheduled"),
            ShiftStateLabel::NotScheduled => write!(f, "not scheduled"),
        }
    }
}

/// Derived status of one shift
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftStatus {
    pub shift: ShiftKey,
    pub scheduled: bool,
    pub trainer_assigned: bool,
    pub pending_claim: bool,
    pub trainer_signed: bool,
    pub manager_signed: bool,
    pub complete: bool,
    pub label: ShiftStateLabel,
}

/// Derive the status of a slot
pub fn slot_status(shift: ShiftKey, slot: Option<&ShiftSlot>) -> ShiftStatus {
    let scheduled = slot.is_some_and(ShiftSlot::is_scheduled);
    let trainer_assigned = slot.is_some_and(|s| s.trainer.is_some());
    let pending_claim = slot.is_some_and(|s| s.trainer.is_none() && s.pending_claim.is_some());
    let trainer_signed = slot.is_some_and(ShiftSlot::is_trainer_signed);
    let manager_signed = slot.is_some_and(ShiftSlot::is_manager_signed);
    let complete = trainer_signed && manager_signed;

    let label = if complete {
        ShiftStateLabel::Complete
    } else if manager_signed {
        ShiftStateLabel::ManagerSignedOnly
    } else if trainer_signed {
        ShiftStateLabel::TrainerSigned
    } else if scheduled {
        ShiftStateLabel::Scheduled
    } else {
        ShiftStateLabel::NotScheduled
    };

    ShiftStatus {
        shift,
        scheduled,
        trainer_assigned,
        pending_claim,
        trainer_signed,
        manager_signed,
        complete,
        label,
    }
}

/// Derive the status of a trainee's shift
pub fn get_shift_status(record: &TraineeRecord, shift: ShiftKey) -> ShiftStatus {
    slot_status(shift, record.slot(shift))
}

/// Status of every canonical shift, in order
pub fn all_shift_statuses(record: &TraineeRecord) -> Vec<ShiftStatus> {
    SHIFT_KEYS
        .iter()
        .map(|&shift| get_shift_status(record, shift))
        .collect()
}

/// Whether a shift is complete (both signatures present)
pub fn is_shift_complete(record: &TraineeRecord, shift: ShiftKey) -> bool {
    get_shift_status(record, shift).complete
}
