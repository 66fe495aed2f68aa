//! Trainee commands - add, list, show, audit, archive, restart, note, verbal-cert

use std::path::Path;

use chrono::Utc;
use serde::Serialize;

use crate::cli::{print_json, Workspace};
use crate::domain::{
    add_note, add_trainee, all_shift_statuses, archive_trainee, certification_progress,
    is_trainee_certified, missing_required_items, next_required_shift, record_verbal_cert,
    restart_trainee, shift_audit_trail, CertificationProgress, ShiftStatus,
};
use crate::errors::Result;
use crate::schemas::{trainee_id, ShiftKey, TraineeRecord};

/// One row of the trainee listing
#[derive(Debug, Serialize)]
struct TraineeSummary<'a> {
    id: &'a str,
    name: &'a str,
    store: &'a str,
    archived: bool,
    certified: bool,
    progress: CertificationProgress,
    next_shift: Option<ShiftKey>,
}

fn summarize<'a>(record: &'a TraineeRecord, required: &[ShiftKey]) -> TraineeSummary<'a> {
    TraineeSummary {
        id: &record.id,
        name: &record.name,
        store: &record.store,
        archived: record.archived,
        certified: is_trainee_certified(record, required),
        progress: certification_progress(record, required),
        next_shift: next_required_shift(record, required),
    }
}

pub async fn add(cwd: Option<&Path>, store: &str, employee: &str, name: &str) -> Result<()> {
    let mut ws = Workspace::open(cwd)?;
    let result = add_trainee(&ws.records, store, employee, name, Utc::now());
    ws.commit(result)?;
    println!("Added trainee {}", trainee_id(store, employee));
    Ok(())
}

pub async fn list(cwd: Option<&Path>, json: bool, store: Option<&str>, archived: bool) -> Result<()> {
    let ws = Workspace::open(cwd)?;
    let required = &ws.config.required_shifts;
    let rows: Vec<TraineeSummary<'_>> = ws
        .records
        .values()
        .filter(|r| archived || !r.archived)
        .filter(|r| store.map_or(true, |s| r.store == s))
        .map(|r| summarize(r, required))
        .collect();

    if json {
        return print_json(&rows);
    }
    if rows.is_empty() {
        println!("No trainees found");
        return Ok(());
    }
    for row in rows {
        let state = if row.certified {
            "certified".to_string()
        } else {
            format!("{}/{}", row.progress.completed, row.progress.required)
        };
        let next = row.next_shift.map(|s| s.to_string()).unwrap_or_default();
        let archived = if row.archived { " (archived)" } else { "" };
        println!(
            "{:<28} {:<20} {:<16} {:<10} {}{}",
            row.id, row.name, row.store, state, next, archived
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct TraineeDetail<'a> {
    #[serde(flatten)]
    summary: TraineeSummary<'a>,
    shifts: Vec<ShiftDetail>,
}

#[derive(Debug, Serialize)]
struct ShiftDetail {
    #[serde(flatten)]
    status: ShiftStatus,
    when: Option<chrono::DateTime<Utc>>,
    trainer: Option<String>,
    missing_items: Vec<String>,
}

pub async fn show(cwd: Option<&Path>, id: &str, json: bool) -> Result<()> {
    let ws = Workspace::open(cwd)?;
    let record = ws.record(id)?;
    let shifts: Vec<ShiftDetail> = all_shift_statuses(record)
        .into_iter()
        .map(|status| {
            let slot = record.slot(status.shift);
            ShiftDetail {
                when: slot.and_then(|s| s.when),
                trainer: slot.and_then(|s| s.trainer.clone()),
                missing_items: missing_required_items(
                    ws.templates.get(status.shift),
                    record.checklist(status.shift),
                ),
                status,
            }
        })
        .collect();
    let detail = TraineeDetail {
        summary: summarize(record, &ws.config.required_shifts),
        shifts,
    };

    if json {
        return print_json(&detail);
    }

    println!("{} ({}) - {}", detail.summary.name, detail.summary.id, detail.summary.store);
    if detail.summary.certified {
        println!("Certified");
    } else {
        println!(
            "Progress: {}/{} required shifts",
            detail.summary.progress.completed, detail.summary.progress.required
        );
    }
    for shift in &detail.shifts {
        let when = shift
            .when
            .map(|w| w.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        let trainer = shift.trainer.as_deref().unwrap_or("-");
        println!(
            "  {:<20} {:<18} {:<17} {}",
            shift.status.shift.label(),
            shift.status.label.to_string(),
            when,
            trainer
        );
        if !shift.missing_items.is_empty() && shift.status.scheduled {
            println!("    missing: {}", shift.missing_items.join(", "));
        }
    }
    if !record.notes.is_empty() {
        println!("Notes:");
        for note in &record.notes {
            println!("  [{}] {}: {}", note.at.format("%Y-%m-%d"), note.author, note.text);
        }
    }
    Ok(())
}

pub async fn audit(cwd: Option<&Path>, id: &str, shift: ShiftKey, json: bool) -> Result<()> {
    let ws = Workspace::open(cwd)?;
    let trail = shift_audit_trail(ws.record(id)?, shift);
    if json {
        return print_json(&trail);
    }
    if trail.is_empty() {
        println!("No history for {}", shift);
    }
    for entry in trail {
        let actor = entry.actor.as_deref().unwrap_or("-");
        println!(
            "{}  {:<10} {:?}",
            entry.at.format("%Y-%m-%d %H:%M"),
            actor,
            entry.event
        );
    }
    Ok(())
}

pub async fn archive(cwd: Option<&Path>, id: &str) -> Result<()> {
    let mut ws = Workspace::open(cwd)?;
    let result = archive_trainee(&ws.records, id);
    ws.commit(result)?;
    println!("Archived {}", id);
    Ok(())
}

pub async fn restart(cwd: Option<&Path>, id: &str) -> Result<()> {
    let mut ws = Workspace::open(cwd)?;
    let result = restart_trainee(&ws.records, id);
    ws.commit(result)?;
    println!("Restarted {}", id);
    Ok(())
}

pub async fn note(cwd: Option<&Path>, id: &str, text: &str, author: &str) -> Result<()> {
    let mut ws = Workspace::open(cwd)?;
    let result = add_note(&ws.records, id, text, author, Utc::now());
    ws.commit(result)
}

pub async fn verbal_cert(cwd: Option<&Path>, id: &str, by: &str) -> Result<()> {
    let mut ws = Workspace::open(cwd)?;
    let result = record_verbal_cert(&ws.records, id, by, Utc::now());
    ws.commit(result)?;
    println!("Recorded manual certification for {}", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ShiftcertError;
    use tempfile::TempDir;

    fn setup() -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(".shiftcert")).unwrap();
        temp
    }

    #[tokio::test]
    async fn test_add_and_archive() {
        let temp = setup();
        add(Some(temp.path()), "Downtown", "42", "Jo").await.unwrap();

        let err = add(Some(temp.path()), "Downtown", "42", "Jo").await.unwrap_err();
        assert!(matches!(err, ShiftcertError::TransitionRejected(_)));

        archive(Some(temp.path()), "downtown_42").await.unwrap();
        let ws = Workspace::open(Some(temp.path())).unwrap();
        assert!(ws.record("downtown_42").unwrap().archived);
    }

    #[tokio::test]
    async fn test_note_and_verbal_cert() {
        let temp = setup();
        add(Some(temp.path()), "Downtown", "42", "Jo").await.unwrap();
        note(Some(temp.path()), "downtown_42", "great with guests", "m1")
            .await
            .unwrap();
        verbal_cert(Some(temp.path()), "downtown_42", "m1").await.unwrap();

        let ws = Workspace::open(Some(temp.path())).unwrap();
        let record = ws.record("downtown_42").unwrap();
        assert_eq!(record.notes.len(), 1);
        assert!(is_trainee_certified(record, &ws.config.required_shifts));
    }

    #[tokio::test]
    async fn test_show_unknown_trainee() {
        let temp = setup();
        let err = show(Some(temp.path()), "nobody", true).await.unwrap_err();
        assert_eq!(err.code(), "TRAINEE_NOT_FOUND");
    }
}
