//! Certification workflow engine
//!
//! Everything here is a pure function over an in-memory snapshot. Reads
//! derive status; writes return a new `RecordSet` that the caller persists.

mod audit;
mod certification;
mod checklist;
mod claims;
mod effectiveness;
mod signoff;
mod status;
mod test_gate;
mod trainees;
mod transitions;
mod validation;


pub use audit::{shift_audit_trail, AuditEntry, AuditEvent};
pub use certification::{
    all_required_complete, certification_progress, is_trainee_certified, next_required_shift,
    normalize_certification, normalize_records, CertificationProgress,
};
pub use checklist::{
    is_checklist_complete, item_satisfied, missing_required_items, validate_item_value,
};
pub use claims::{
    approve_claim, assign_trainer, claim_shift, get_coverage_shifts,
    get_pending_claims_for_trainer, reject_claim, CoverageShift, PendingClaimView,
};
pub use effectiveness::{
    get_trainer_effectiveness, rank_trainers, TrainerEffectiveness, BASELINE_SCORE,
};
pub use signoff::{
    manager_sign_off, trainer_sign_off, update_checklist_item, update_feedback, FeedbackUpdate,
    FieldUpdate, SignOffInput,
};
pub use status::{
    all_shift_statuses, get_shift_status, is_shift_complete, slot_status, ShiftStateLabel,
    ShiftStatus,
};
pub use test_gate::{
    attempts_for_trainee, has_passed_test, missing_tests, record_attempt,
    shift_required_tests_passed,
};
pub use trainees::{
    add_note, add_trainee, archive_trainee, record_verbal_cert, restart_trainee, schedule_shift,
};
pub use transitions::TransitionResult;
pub use validation::{
    can_manager_sign, can_trainer_sign, validate_readiness, ValidationContext, ValidationResult,
};
