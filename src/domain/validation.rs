//! Validation rules for sign-off transitions

use crate::schemas::{Config, Readiness, ShiftKey, ShiftSlot, TemplateCatalog, TestAttempts, TraineeRecord};

use super::checklist::missing_required_items;
use super::test_gate::missing_tests;

/// Static reference data and test results needed to evaluate the sign-off gates
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Required shifts and required tests
    pub config: &'a Config,

    /// Checklist templates per shift
    pub templates: &'a TemplateCatalog,

    /// Every trainee's test attempts
    pub attempts: &'a TestAttempts,
}

impl<'a> ValidationContext<'a> {
    pub fn new(config: &'a Config, templates: &'a TemplateCatalog, attempts: &'a TestAttempts) -> Self {
        ValidationContext {
            config,
            templates,
            attempts,
        }
    }
}

/// Result of a validation check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub valid: bool,

    /// Reason for failure (if valid is false)
    pub reason: Option<String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        ValidationResult {
            valid: true,
            reason: None,
        }
    }

    /// Create a failed validation result
    pub fn failure(reason: impl Into<String>) -> Self {
        ValidationResult {
            valid: false,
            reason: Some(reason.into()),
        }
    }

    /// Convert into a `Result` carrying the failure reason
    pub fn into_result(self) -> Result<(), String> {
        if self.valid {
            Ok(())
        } else {
            Err(self.reason.unwrap_or_else(|| "validation failed".to_string()))
        }
    }
}

/// Validate that supplied readiness scores are within 1-5
pub fn validate_readiness(readiness: &Readiness) -> ValidationResult {
    if !readiness.is_valid() {
        return ValidationResult::failure(format!(
            "readiness scores must be between {} and {}",
            Readiness::MIN,
            Readiness::MAX
        ));
    }
    ValidationResult::success()
}

/// Validate a trainer sign-off on `shift`
pub fn can_trainer_sign(
    record: &TraineeRecord,
    shift: ShiftKey,
    ctx: &ValidationContext<'_>,
) -> ValidationResult {
    let Some(slot) = record.slot(shift) else {
        return ValidationResult::failure(format!("{} is not scheduled", shift));
    };
    if slot.trainer.is_none() {
        return ValidationResult::failure(format!("{} has no assigned trainer", shift));
    }
    if slot.is_trainer_signed() {
        return ValidationResult::failure(format!("{} is already signed by its trainer", shift));
    }

    let tests = missing_tests(ctx.config, shift, &record.id, ctx.attempts);
    if !tests.is_empty() {
        return ValidationResult::failure(format!("required tests not passed: {}", tests.join(", ")));
    }

    let items = missing_required_items(ctx.templates.get(shift), record.checklist(shift));
    if !items.is_empty() {
        return ValidationResult::failure(format!(
            "required checklist items missing: {}",
            items.join(", ")
        ));
    }

    ValidationResult::success()
}

/// Validate a manager sign-off on a slot
pub fn can_manager_sign(shift: ShiftKey, slot: Option<&ShiftSlot>) -> ValidationResult {
    let Some(slot) = slot else {
        return ValidationResult::failure(format!("{} is not scheduled", shift));
    };
    if !slot.is_trainer_signed() {
        return ValidationResult::failure(format!("{} awaits trainer sign-off", shift));
    }
    if slot.is_manager_signed() {
        return ValidationResult::failure(format!("{} is already signed by a manager", shift));
    }
    ValidationResult::success()
}
