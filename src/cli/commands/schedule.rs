//! Scheduling and coverage commands

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::cli::{print_json, Workspace};
use crate::domain::{
    approve_claim, assign_trainer, claim_shift, get_coverage_shifts,
    get_pending_claims_for_trainer, reject_claim, schedule_shift,
};
use crate::errors::Result;
use crate::schemas::ShiftKey;

pub async fn schedule(
    cwd: Option<&Path>,
    id: &str,
    shift: ShiftKey,
    when: Option<DateTime<Utc>>,
    trainer: Option<&str>,
) -> Result<()> {
    let mut ws = Workspace::open(cwd)?;
    let result = schedule_shift(&ws.records, id, shift, when, trainer, Utc::now());
    ws.commit(result)?;
    match when {
        Some(when) => println!("Scheduled {} for {} at {}", shift, id, when.to_rfc3339()),
        None => println!("Unscheduled {} for {}", shift, id),
    }
    Ok(())
}

pub async fn assign(cwd: Option<&Path>, id: &str, shift: ShiftKey, trainer: &str) -> Result<()> {
    let mut ws = Workspace::open(cwd)?;
    let result = assign_trainer(&ws.records, id, shift, trainer, Utc::now());
    ws.commit(result)?;
    println!("Assigned {} to {} for {}", trainer, shift, id);
    Ok(())
}

pub async fn claim(cwd: Option<&Path>, id: &str, shift: ShiftKey, trainer: &str) -> Result<()> {
    let mut ws = Workspace::open(cwd)?;
    let result = claim_shift(&ws.records, id, shift, trainer, Utc::now());
    ws.commit(result)?;
    println!("{} claimed {} for {}; awaiting approval", trainer, shift, id);
    Ok(())
}

pub async fn approve(cwd: Option<&Path>, id: &str, shift: ShiftKey) -> Result<()> {
    let mut ws = Workspace::open(cwd)?;
    let result = approve_claim(&ws.records, id, shift, Utc::now());
    ws.commit(result)?;
    println!("Approved claim on {} for {}", shift, id);
    Ok(())
}

pub async fn reject(cwd: Option<&Path>, id: &str, shift: ShiftKey) -> Result<()> {
    let mut ws = Workspace::open(cwd)?;
    let result = reject_claim(&ws.records, id, shift);
    ws.commit(result)?;
    println!("Rejected claim on {} for {}", shift, id);
    Ok(())
}

pub async fn coverage(cwd: Option<&Path>, store: &str, include_pending: bool, json: bool) -> Result<()> {
    let ws = Workspace::open(cwd)?;
    let shifts = get_coverage_shifts(&ws.records, store, include_pending);
    if json {
        return print_json(&shifts);
    }
    if shifts.is_empty() {
        println!("All scheduled shifts in {} have a trainer", store);
        return Ok(());
    }
    for shift in shifts {
        let pending = shift
            .pending_trainer
            .map(|t| format!(" (claimed by {})", t))
            .unwrap_or_default();
        println!(
            "{}  {:<20} {:<20} {}{}",
            shift.when.format("%Y-%m-%d %H:%M"),
            shift.trainee_name,
            shift.shift.label(),
            shift.trainee_id,
            pending
        );
    }
    Ok(())
}

pub async fn claims(cwd: Option<&Path>, trainer: &str, json: bool) -> Result<()> {
    let ws = Workspace::open(cwd)?;
    let claims = get_pending_claims_for_trainer(&ws.records, trainer);
    if json {
        return print_json(&claims);
    }
    if claims.is_empty() {
        println!("No pending claims for {}", trainer);
        return Ok(());
    }
    for claim in claims {
        let when = claim
            .when
            .map(|w| w.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}  {:<20} {:<20} {}",
            when,
            claim.trainee_name,
            claim.shift.label(),
            claim.trainee_id
        );
    }
    Ok(())
}
