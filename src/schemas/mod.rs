//! Schema types for shiftcert
//!
//! Plain serde records; all workflow rules live in `crate::domain`.

mod checklist;
mod config;
mod roster;
mod shift;
mod test_attempt;
mod trainee;

pub use checklist::{
    ChecklistEntry, ChecklistInstance, ChecklistTemplate, ItemKind, ItemValue, Readiness,
    TemplateCatalog, TemplateItem, TemplateSection,
};
pub use config::{Config, EffectivenessWeights};
pub use roster::{Roster, RosterTrainer};
pub use shift::{ClaimRequest, ClaimState, ShiftKey, ShiftSlot, SHIFT_KEYS};
pub use test_attempt::{attempt_key, AttemptSummary, TestAttempt, TestAttempts};
pub use trainee::{
    is_valid_employee_number, trainee_id, Note, RecordSet, ShiftFeedback, TraineeRecord,
    VerbalCert,
};
