//! Claim and coverage workflow
//!
//! Claim sub-state per slot: `Open -> PendingClaim -> Assigned`, or
//! `Open -> Assigned` through direct assignment. A re-claim by a different
//! trainer replaces the pending claimant (last claimant wins, no queue).

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::schemas::{ClaimRequest, ClaimState, RecordSet, ShiftKey, ShiftSlot, TraineeRecord};

use super::transitions::{update_record, TransitionResult};

/// A trainee shift that still needs a trainer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageShift {
    pub trainee_id: String,
    pub trainee_name: String,
    pub store: String,
    pub shift: ShiftKey,
    pub when: DateTime<Utc>,
    pub is_pending: bool,
    /// Trainer awaiting approval when `is_pending`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_trainer: Option<String>,
}

/// A trainer's own claim awaiting manager approval
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingClaimView {
    pub trainee_id: String,
    pub trainee_name: String,
    pub store: String,
    pub shift: ShiftKey,
    pub when: Option<DateTime<Utc>>,
    pub claimed_at: DateTime<Utc>,
}

fn slot_of(record: &TraineeRecord, shift: ShiftKey) -> ShiftSlot {
    record.slot(shift).cloned().unwrap_or_default()
}

/// Request assignment to an open shift.
///
/// Legal when the slot is `Open`, or `PendingClaim` by another trainer.
/// Claiming an assigned or unscheduled shift is refused.
pub fn claim_shift(
    records: &RecordSet,
    trainee_id: &str,
    shift: ShiftKey,
    trainer_id: &str,
    now: DateTime<Utc>,
) -> TransitionResult {
    update_record(records, trainee_id, |record| {
        let mut slot = slot_of(&record, shift);
        match slot.claim_state() {
            ClaimState::Unscheduled => {
                return Err(format!("{} is not scheduled", shift));
            }
            ClaimState::Assigned(trainer) => {
                return Err(format!("{} is already assigned to {}", shift, trainer));
            }
            ClaimState::PendingClaim(claimant) if claimant == trainer_id => {
                return Err(format!("{} already claimed {}", trainer_id, shift));
            }
            ClaimState::PendingClaim(_) | ClaimState::Open => {}
        }

        slot.pending_claim = Some(ClaimRequest {
            trainer: trainer_id.to_string(),
            at: now,
        });
        Ok(record.with_slot(shift, slot))
    })
}

/// Assign a trainer to a slot. Shared by direct assignment and claim approval.
fn assign(mut slot: ShiftSlot, trainer_id: &str, now: DateTime<Utc>) -> ShiftSlot {
    slot.approved_claim = slot
        .pending_claim
        .take()
        .filter(|claim| claim.trainer == trainer_id);
    slot.trainer = Some(trainer_id.to_string());
    slot.assigned_at = Some(now);
    slot
}

/// Approve the pending claim: `PendingClaim -> Assigned`
pub fn approve_claim(
    records: &RecordSet,
    trainee_id: &str,
    shift: ShiftKey,
    now: DateTime<Utc>,
) -> TransitionResult {
    update_record(records, trainee_id, |record| {
        let slot = slot_of(&record, shift);
        match slot.claim_state() {
            ClaimState::PendingClaim(claimant) => {
                let slot = assign(slot, &claimant, now);
                Ok(record.with_slot(shift, slot))
            }
            ClaimState::Assigned(trainer) => {
                Err(format!("{} is already assigned to {}", shift, trainer))
            }
            ClaimState::Open | ClaimState::Unscheduled => {
                Err(format!("{} has no pending claim", shift))
            }
        }
    })
}

/// Assign a trainer directly, skipping the claim handshake.
///
/// Any pending claim is cleared. Refused once the trainer has signed off,
/// since the signature belongs to the assigned trainer.
pub fn assign_trainer(
    records: &RecordSet,
    trainee_id: &str,
    shift: ShiftKey,
    trainer_id: &str,
    now: DateTime<Utc>,
) -> TransitionResult {
    update_record(records, trainee_id, |record| {
        let slot = slot_of(&record, shift);
        if slot.is_trainer_signed() {
            return Err(format!("{} is already signed by its trainer", shift));
        }
        if slot.trainer.as_deref() == Some(trainer_id) {
            return Err(format!("{} is already assigned to {}", shift, trainer_id));
        }
        let slot = assign(slot, trainer_id, now);
        Ok(record.with_slot(shift, slot))
    })
}

/// Decline the pending claim: `PendingClaim -> Open`
pub fn reject_claim(records: &RecordSet, trainee_id: &str, shift: ShiftKey) -> TransitionResult {
    update_record(records, trainee_id, |record| {
        let mut slot = slot_of(&record, shift);
        match slot.claim_state() {
            ClaimState::PendingClaim(_) => {
                slot.pending_claim = None;
                Ok(record.with_slot(shift, slot))
            }
            _ => Err(format!("{} has no pending claim", shift)),
        }
    })
}

/// Scheduled shifts in `store` without an assigned trainer, earliest first.
///
/// Shifts with a pending claim are included only with `include_pending`, and
/// then flagged `is_pending`. Archived trainees are skipped.
pub fn get_coverage_shifts(
    records: &RecordSet,
    store: &str,
    include_pending: bool,
) -> Vec<CoverageShift> {
    let mut shifts: Vec<CoverageShift> = records
        .values()
        .filter(|record| !record.archived && record.store == store)
        .flat_map(|record| {
            record.schedule.iter().filter_map(move |(&shift, slot)| {
                let when = slot.when?;
                let pending_trainer = match slot.claim_state() {
                    ClaimState::Open => None,
                    ClaimState::PendingClaim(trainer) if include_pending => Some(trainer),
                    _ => return None,
                };
                Some(CoverageShift {
                    trainee_id: record.id.clone(),
                    trainee_name: record.name.clone(),
                    store: record.store.clone(),
                    shift,
                    when,
                    is_pending: pending_trainer.is_some(),
                    pending_trainer,
                })
            })
        })
        .collect();

    shifts.sort_by(|a, b| {
        a.when
            .cmp(&b.when)
            .then_with(|| a.trainee_id.cmp(&b.trainee_id))
            .then_with(|| a.shift.cmp(&b.shift))
    });
    shifts
}

/// Claims made by `trainer_id` that still await approval, earliest shift first
pub fn get_pending_claims_for_trainer(
    records: &RecordSet,
    trainer_id: &str,
) -> Vec<PendingClaimView> {
    let mut claims: Vec<PendingClaimView> = records
        .values()
        .filter(|record| !record.archived)
        .flat_map(|record| {
            record.schedule.iter().filter_map(move |(&shift, slot)| {
                match (slot.claim_state(), &slot.pending_claim) {
                    (ClaimState::PendingClaim(claimant), Some(claim)) if claimant == trainer_id => {
                        Some(PendingClaimView {
                            trainee_id: record.id.clone(),
                            trainee_name: record.name.clone(),
                            store: record.store.clone(),
                            shift,
                            when: slot.when,
                            claimed_at: claim.at,
                        })
                    }
                    _ => None,
                }
            })
        })
        .collect();

    claims.sort_by(|a, b| a.when.cmp(&b.when).then_with(|| a.claimed_at.cmp(&b.claimed_at)));
    claims
}
