//! Effectiveness and leaderboard commands

use std::path::Path;

use chrono::Utc;

use crate::cache::RosterCache;
use crate::cli::{print_json, Workspace};
use crate::domain::{get_trainer_effectiveness, rank_trainers, TrainerEffectiveness};
use crate::errors::{Result, ShiftcertError};
use crate::fs::JsonRosterSource;

fn print_row(rank: Option<usize>, name: &str, e: &TrainerEffectiveness) {
    let rank = rank.map(|r| format!("{:>2}. ", r)).unwrap_or_default();
    println!(
        "{}{:<20} {:>3}  shifts {}/{}  tests {}/{}  checklists {}/{}  trainees {}",
        rank,
        name,
        e.score,
        e.completed_shifts,
        e.assigned_shifts,
        e.passed_tests,
        e.required_tests,
        e.complete_checklists,
        e.assigned_shifts,
        e.trainee_count
    );
}

pub async fn effectiveness(cwd: Option<&Path>, trainer: &str, store: Option<&str>, json: bool) -> Result<()> {
    let ws = Workspace::open(cwd)?;
    let result = get_trainer_effectiveness(&ws.records, trainer, store, &ws.ctx());
    if json {
        return print_json(&result);
    }
    print_row(None, trainer, &result);
    Ok(())
}

pub async fn leaderboard(cwd: Option<&Path>, store: &str, json: bool) -> Result<()> {
    let ws = Workspace::open(cwd)?;
    let source = JsonRosterSource::new(&ws.root);
    let mut cache = RosterCache::with_ttl_seconds(ws.config.roster_cache_ttl_seconds);
    let roster = cache
        .roster(&source, store, Utc::now())?
        .ok_or_else(|| ShiftcertError::InvalidArgument(format!("no roster for store {}", store)))?;

    let ranked = rank_trainers(&ws.records, &roster, &ws.ctx());
    if json {
        return print_json(&ranked);
    }
    for (i, entry) in ranked.iter().enumerate() {
        let name = roster
            .trainer(&entry.trainer_id)
            .map(|t| t.name.as_str())
            .unwrap_or(entry.trainer_id.as_str());
        print_row(Some(i + 1), name, entry);
    }
    Ok(())
}
