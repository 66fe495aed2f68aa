//! Checklist, feedback and sign-off commands

use std::path::Path;

use chrono::Utc;
use serde::Serialize;

use crate::cli::{print_json, FeedbackArgs, Workspace};
use crate::domain::{
    item_satisfied, manager_sign_off, trainer_sign_off, update_checklist_item,
    update_feedback, FeedbackUpdate, FieldUpdate, SignOffInput,
};
use crate::errors::{Result, ShiftcertError};
use crate::schemas::{ChecklistTemplate, ItemKind, ItemValue, Readiness, ShiftKey};

fn field_update(value: Option<String>) -> FieldUpdate {
    match value {
        None => FieldUpdate::Keep,
        Some(v) if v.trim().is_empty() => FieldUpdate::Clear,
        Some(v) => FieldUpdate::Set(v),
    }
}

/// Convert command-line feedback flags to an update; an empty value clears.
pub fn feedback_update(args: FeedbackArgs) -> FeedbackUpdate {
    FeedbackUpdate {
        strengths: field_update(args.strengths),
        opportunities: field_update(args.opportunities),
        goals_next: field_update(args.goals_next),
    }
}

/// Parse a raw item value using the template's declared kind. Without a
/// template entry the kind is guessed from the text.
fn parse_item_value(template: Option<&ChecklistTemplate>, item_id: &str, raw: &str) -> Result<ItemValue> {
    let kind = match template.and_then(|t| t.item(item_id)) {
        Some(item) => item.kind.clone(),
        None if template.is_some() => {
            return Err(ShiftcertError::InvalidArgument(format!(
                "unknown checklist item: {}",
                item_id
            )));
        }
        None => match raw.trim() {
            "true" | "false" => ItemKind::Checkbox,
            r if r.parse::<u8>().is_ok() => ItemKind::Rating { max: 3 },
            _ => ItemKind::Text,
        },
    };
    ItemValue::parse_for(&kind, raw).map_err(ShiftcertError::InvalidArgument)
}

#[derive(Debug, Serialize)]
struct ChecklistRow<'a> {
    id: &'a str,
    label: &'a str,
    kind: &'static str,
    required: bool,
    satisfied: bool,
    value: Option<&'a ItemValue>,
}

pub async fn checklist(
    cwd: Option<&Path>,
    id: &str,
    shift: ShiftKey,
    item: Option<&str>,
    value: Option<&str>,
    author: &str,
    json: bool,
) -> Result<()> {
    let mut ws = Workspace::open(cwd)?;
    let template = ws.templates.get(shift);

    let Some(item_id) = item else {
        let record = ws.record(id)?;
        let instance = record.checklist(shift);
        let rows: Vec<ChecklistRow<'_>> = template
            .map(|t| {
                t.items()
                    .map(|item| {
                        let value = instance.and_then(|i| i.value(&item.id));
                        ChecklistRow {
                            id: &item.id,
                            label: &item.label,
                            kind: item.kind.name(),
                            required: item.required,
                            satisfied: item_satisfied(item, value),
                            value,
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();
        if json {
            return print_json(&rows);
        }
        if rows.is_empty() {
            println!("No checklist template for {}", shift);
        }
        for row in rows {
            let mark = if row.satisfied { "x" } else { " " };
            let required = if row.required { "*" } else { "" };
            println!("[{}] {:<20} {}{}", mark, row.id, row.label, required);
        }
        return Ok(());
    };

    let raw = value.ok_or_else(|| {
        ShiftcertError::InvalidArgument(format!("a value is required for item {}", item_id))
    })?;
    let value = parse_item_value(template, item_id, raw)?;
    let result = update_checklist_item(
        &ws.records,
        &ws.templates,
        id,
        shift,
        item_id,
        value,
        author,
        Utc::now(),
    );
    ws.commit(result)?;
    println!("Recorded {} on {} for {}", item_id, shift, id);
    Ok(())
}

pub async fn feedback(cwd: Option<&Path>, id: &str, shift: ShiftKey, args: FeedbackArgs) -> Result<()> {
    let mut ws = Workspace::open(cwd)?;
    let result = update_feedback(&ws.records, id, shift, feedback_update(args));
    ws.commit(result)
}

pub async fn sign_trainer(
    cwd: Option<&Path>,
    id: &str,
    shift: ShiftKey,
    trainer: &str,
    readiness: Readiness,
    args: FeedbackArgs,
) -> Result<()> {
    let mut ws = Workspace::open(cwd)?;
    let input = SignOffInput {
        readiness,
        feedback: feedback_update(args),
    };

    let result = trainer_sign_off(&ws.records, &ws.ctx(), id, shift, trainer, input, Utc::now());
    ws.commit(result)?;
    println!("{} signed {} for {}", trainer, shift, id);
    Ok(())
}

pub async fn sign_manager(cwd: Option<&Path>, id: &str, shift: ShiftKey, manager: &str) -> Result<()> {
    let mut ws = Workspace::open(cwd)?;
    let result = manager_sign_off(&ws.records, &ws.config, id, shift, manager, Utc::now());
    ws.commit(result)?;
    println!("{} approved {} for {}", manager, shift, id);
    if ws.record(id)?.certified == Some(true) {
        println!("{} is now certified", id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::{schedule, trainee};
    use crate::fs::{get_templates_path, write_json};
    use crate::schemas::{TemplateCatalog, TemplateItem, TemplateSection};
    use tempfile::TempDir;

    async fn setup() -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(".shiftcert")).unwrap();
        let catalog = TemplateCatalog::new([ChecklistTemplate {
            shift: ShiftKey::Follow,
            title: "Follow".to_string(),
            sections: vec![TemplateSection {
                title: "Floor".to_string(),
                items: vec![TemplateItem {
                    id: "greets".to_string(),
                    label: "Greets the table".to_string(),
                    kind: ItemKind::Checkbox,
                    required: true,
                }],
            }],
        }]);
        write_json(&get_templates_path(temp.path()), &catalog).unwrap();

        let cwd = Some(temp.path());
        trainee::add(cwd, "Downtown", "1", "Sam").await.unwrap();
        schedule::schedule(cwd, "downtown_1", ShiftKey::Follow, Some(Utc::now()), Some("t1"))
            .await
            .unwrap();
        temp
    }

    #[test]
    fn test_feedback_update_mapping() {
        let update = feedback_update(FeedbackArgs {
            strengths: Some("calm".to_string()),
            opportunities: Some(String::new()),
            goals_next: None,
        });
        assert_eq!(update.strengths, FieldUpdate::Set("calm".to_string()));
        assert_eq!(update.opportunities, FieldUpdate::Clear);
        assert_eq!(update.goals_next, FieldUpdate::Keep);
    }

    #[test]
    fn test_parse_without_template_guesses_kind() {
        assert_eq!(parse_item_value(None, "x", "true").unwrap(), ItemValue::Checkbox(true));
        assert_eq!(parse_item_value(None, "x", "2").unwrap(), ItemValue::Rating(2));
        assert_eq!(
            parse_item_value(None, "x", "section 4").unwrap(),
            ItemValue::Text("section 4".to_string())
        );
    }

    #[tokio::test]
    async fn test_sign_off_flow() {
        let temp = setup().await;
        let cwd = Some(temp.path());

        let err = sign_trainer(cwd, "downtown_1", ShiftKey::Follow, "t1", Readiness::default(), FeedbackArgs::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ShiftcertError::TransitionRejected(_)));

        checklist(cwd, "downtown_1", ShiftKey::Follow, Some("greets"), Some("yes"), "t1", false)
            .await
            .unwrap();
        sign_trainer(cwd, "downtown_1", ShiftKey::Follow, "t1", Readiness::default(), FeedbackArgs::default())
            .await
            .unwrap();
        sign_manager(cwd, "downtown_1", ShiftKey::Follow, "m1").await.unwrap();

        let ws = Workspace::open(cwd).unwrap();
        let slot = ws.record("downtown_1").unwrap().slot(ShiftKey::Follow).unwrap();
        assert!(slot.is_trainer_signed());
        assert!(slot.is_manager_signed());
    }

    #[tokio::test]
    async fn test_unknown_item_rejected() {
        let temp = setup().await;
        let err = checklist(
            Some(temp.path()),
            "downtown_1",
            ShiftKey::Follow,
            Some("sings"),
            Some("yes"),
            "t1",
            false,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ShiftcertError::InvalidArgument(_)));
    }
}
