//! Sign-off and checklist transitions
//!
//! Pure functions over the record set. Each one either applies completely or
//! returns the input unchanged with a reason.

use chrono::{DateTime, Utc};

use crate::schemas::{
    ChecklistEntry, Config, ItemValue, Readiness, RecordSet, ShiftFeedback, ShiftKey,
    TemplateCatalog,
};

use super::certification::all_required_complete;
use super::checklist::validate_item_value;
use super::transitions::{update_record, TransitionResult};
use super::validation::{can_manager_sign, can_trainer_sign, validate_readiness, ValidationContext};

/// Change to a single optional text field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate {
    /// Leave the current value
    #[default]
    Keep,
    Set(String),
    Clear,
}

impl FieldUpdate {
    fn apply(self, current: Option<String>) -> Option<String> {
        match self {
            FieldUpdate::Keep => current,
            FieldUpdate::Set(value) => Some(value),
            FieldUpdate::Clear => None,
        }
    }
}

/// Independent updates to each feedback field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackUpdate {
    pub strengths: FieldUpdate,
    pub opportunities: FieldUpdate,
    pub goals_next: FieldUpdate,
}

impl FeedbackUpdate {
    pub fn is_noop(&self) -> bool {
        *self == FeedbackUpdate::default()
    }

    fn apply(self, current: ShiftFeedback) -> ShiftFeedback {
        ShiftFeedback {
            strengths: self.strengths.apply(current.strengths),
            opportunities: self.opportunities.apply(current.opportunities),
            goals_next: self.goals_next.apply(current.goals_next),
        }
    }
}

/// Extra data recorded with a trainer sign-off
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignOffInput {
    /// Scores to merge into the checklist readiness
    pub readiness: Readiness,

    /// Notes to merge into the shift feedback
    pub feedback: FeedbackUpdate,
}

/// Trainer sign-off.
///
/// Requires an assigned trainer, no previous trainer signature, all required
/// tests passed and a complete checklist. Merges readiness scores and feedback.
pub fn trainer_sign_off(
    records: &RecordSet,
    ctx: &ValidationContext<'_>,
    trainee_id: &str,
    shift: ShiftKey,
    signer: &str,
    input: SignOffInput,
    now: DateTime<Utc>,
) -> TransitionResult {
    update_record(records, trainee_id, |record| {
        can_trainer_sign(&record, shift, ctx).into_result()?;
        validate_readiness(&input.readiness).into_result()?;

        let mut slot = record.slot(shift).cloned().unwrap_or_default();
        slot.trainer_signed_by = Some(signer.to_string());
        slot.trainer_signed_at = Some(now);

        let mut checklist = record.checklist(shift).cloned().unwrap_or_default();
        checklist.readiness = checklist.readiness.merged_with(input.readiness);

        let feedback = input
            .feedback
            .apply(record.feedback.get(&shift).cloned().unwrap_or_default());

        tracing::debug!(trainee = %record.id, %shift, signer, "trainer signed off");
        Ok(record
            .with_slot(shift, slot)
            .with_checklist(shift, checklist)
            .with_feedback(shift, feedback))
    })
}

/// Manager sign-off. Requires the trainer signature and no previous manager signature.
///
/// When this completes the last required shift, the record's cached
/// certification flag is set.
pub fn manager_sign_off(
    records: &RecordSet,
    config: &Config,
    trainee_id: &str,
    shift: ShiftKey,
    signer: &str,
    now: DateTime<Utc>,
) -> TransitionResult {
    update_record(records, trainee_id, |record| {
        can_manager_sign(shift, record.slot(shift)).into_result()?;

        let mut slot = record.slot(shift).cloned().unwrap_or_default();
        slot.manager_signed_by = Some(signer.to_string());
        slot.manager_signed_at = Some(now);

        let mut next = record.with_slot(shift, slot);
        if next.certified != Some(true) && all_required_complete(&next, &config.required_shifts) {
            tracing::info!(trainee = %next.id, "trainee certified");
            next.certified = Some(true);
            next.certified_at = Some(now);
        }
        Ok(next)
    })
}

/// Upsert one checklist item, validated against the shift's template
#[allow(clippy::too_many_arguments)]
pub fn update_checklist_item(
    records: &RecordSet,
    templates: &TemplateCatalog,
    trainee_id: &str,
    shift: ShiftKey,
    item_id: &str,
    value: ItemValue,
    author: &str,
    now: DateTime<Utc>,
) -> TransitionResult {
    update_record(records, trainee_id, |record| {
        validate_item_value(templates.get(shift), item_id, &value)?;

        let mut checklist = record.checklist(shift).cloned().unwrap_or_default();
        checklist.items.insert(
            item_id.to_string(),
            ChecklistEntry {
                value,
                author: author.to_string(),
                at: now,
            },
        );
        Ok(record.with_checklist(shift, checklist))
    })
}

/// Set, clear or keep each feedback field independently
pub fn update_feedback(
    records: &RecordSet,
    trainee_id: &str,
    shift: ShiftKey,
    update: FeedbackUpdate,
) -> TransitionResult {
    update_record(records, trainee_id, |record| {
        if update.is_noop() {
            return Err("no feedback fields to update".to_string());
        }
        let feedback = update.apply(record.feedback.get(&shift).cloned().unwrap_or_default());
        Ok(record.with_feedback(shift, feedback))
    })
}
