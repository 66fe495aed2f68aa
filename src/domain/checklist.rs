//! Checklist completion rules
//!
//! A checklist is complete when every required template item holds a
//! satisfying value. Values that do not fit the item's declared type count as
//! missing rather than as errors.

use crate::schemas::{ChecklistInstance, ChecklistTemplate, ItemKind, ItemValue, TemplateItem};

/// Whether a recorded value satisfies a template item
pub fn item_satisfied(item: &TemplateItem, value: Option<&ItemValue>) -> bool {
    let Some(value) = value else {
        return false;
    };
    match (&item.kind, value) {
        (ItemKind::Checkbox, ItemValue::Checkbox(checked)) => *checked,
        (ItemKind::Text, ItemValue::Text(text)) => !text.trim().is_empty(),
        (ItemKind::Textarea, ItemValue::Textarea(text)) => !text.trim().is_empty(),
        (ItemKind::Rating { .. }, ItemValue::Rating(rating)) => *rating >= 1,
        (ItemKind::Dropdown { options }, ItemValue::Dropdown(choice)) => {
            !choice.is_empty() && options.iter().any(|o| o == choice)
        }
        _ => false,
    }
}

/// Ids of the required items that are not yet satisfied, in template order
pub fn missing_required_items(
    template: Option<&ChecklistTemplate>,
    instance: Option<&ChecklistInstance>,
) -> Vec<String> {
    let Some(template) = template else {
        return Vec::new();
    };
    template
        .required_items()
        .filter(|item| !item_satisfied(item, instance.and_then(|i| i.value(&item.id))))
        .map(|item| item.id.clone())
        .collect()
}

/// Whether every required item in the template is satisfied.
///
/// A missing template is vacuously complete.
pub fn is_checklist_complete(
    template: Option<&ChecklistTemplate>,
    instance: Option<&ChecklistInstance>,
) -> bool {
    missing_required_items(template, instance).is_empty()
}

/// Check a value against the template before it is written.
///
/// Returns the reason the value is not acceptable. With no template every
/// value is accepted.
pub fn validate_item_value(
    template: Option<&ChecklistTemplate>,
    item_id: &str,
    value: &ItemValue,
) -> Result<(), String> {
    let Some(template) = template else {
        return Ok(());
    };
    let item = template
        .item(item_id)
        .ok_or_else(|| format!("checklist has no item '{}'", item_id))?;

    match (&item.kind, value) {
        (ItemKind::Checkbox, ItemValue::Checkbox(_))
        | (ItemKind::Text, ItemValue::Text(_))
        | (ItemKind::Textarea, ItemValue::Textarea(_)) => Ok(()),
        (ItemKind::Rating { max }, ItemValue::Rating(rating)) => {
            if (1..=*max).contains(rating) {
                Ok(())
            } else {
                Err(format!("rating for '{}' must be between 1 and {}", item_id, max))
            }
        }
        (ItemKind::Dropdown { options }, ItemValue::Dropdown(choice)) => {
            if options.iter().any(|o| o == choice) {
                Ok(())
            } else {
                Err(format!("'{}' is not an option for '{}'", choice, item_id))
            }
        }
        (kind, value) => Err(format!(
            "item '{}' expects a {} value, got {}",
            item_id,
            kind.name(),
            value.kind_name()
        )),
    }
}
