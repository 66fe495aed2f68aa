//! Trainer effectiveness scoring
//!
//! score = 100 * (wc * completion_rate + wt * test_pass_rate + wl * checklist_rate) / (wc + wt + wl)
//!
//! - completion_rate: assigned shifts that are complete / assigned shifts
//! - test_pass_rate: required tests passed / required tests, over the
//!   trainer's assigned shifts (1.0 when none are required)
//! - checklist_rate: assigned shifts with a complete checklist / assigned shifts
//!
//! A trainer with no assigned shifts scores `BASELINE_SCORE`.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::schemas::{EffectivenessWeights, RecordSet, Roster};

use super::checklist::is_checklist_complete;
use super::status::is_shift_complete;
use super::test_gate::has_passed_test;
use super::validation::ValidationContext;

/// Score given to a trainer with no assigned shifts
pub const BASELINE_SCORE: u8 = 0;

/// Aggregated effectiveness of one trainer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainerEffectiveness {
    pub trainer_id: String,
    /// Composite score, 0-100
    pub score: u8,
    /// Distinct trainees with at least one shift assigned to the trainer
    pub trainee_count: usize,
    pub assigned_shifts: usize,
    pub completed_shifts: usize,
    pub required_tests: usize,
    pub passed_tests: usize,
    pub complete_checklists: usize,
}

fn rate(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        1.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn composite(weights: &EffectivenessWeights, completion: f64, tests: f64, checklist: f64) -> u8 {
    let wc = weights.completion.max(0.0);
    let wt = weights.tests.max(0.0);
    let wl = weights.checklist.max(0.0);
    let total = wc + wt + wl;
    if !total.is_finite() || total <= 0.0 {
        return BASELINE_SCORE;
    }
    let score = 100.0 * (wc * completion + wt * tests + wl * checklist) / total;
    score.round().clamp(0.0, 100.0) as u8
}

/// Compute a trainer's effectiveness over non-archived trainees in `store`.
///
/// `store: None` considers every store.
pub fn get_trainer_effectiveness(
    records: &RecordSet,
    trainer_id: &str,
    store: Option<&str>,
    ctx: &ValidationContext<'_>,
) -> TrainerEffectiveness {
    let mut trainees = BTreeSet::new();
    let mut assigned_shifts = 0;
    let mut completed_shifts = 0;
    let mut required_tests = 0;
    let mut passed_tests = 0;
    let mut complete_checklists = 0;

    let in_scope = records
        .values()
        .filter(|r| !r.archived)
        .filter(|r| store.map_or(true, |s| r.store == s));

    for record in in_scope {
        for (&shift, slot) in &record.schedule {
            if slot.trainer.as_deref() != Some(trainer_id) {
                continue;
            }
            trainees.insert(record.id.as_str());
            assigned_shifts += 1;

            if is_shift_complete(record, shift) {
                completed_shifts += 1;
            }
            if is_checklist_complete(ctx.templates.get(shift), record.checklist(shift)) {
                complete_checklists += 1;
            }
            for test_id in ctx.config.tests_for(shift) {
                required_tests += 1;
                if has_passed_test(&record.id, test_id, ctx.attempts) {
                    passed_tests += 1;
                }
            }
        }
    }

    let score = if assigned_shifts == 0 {
        BASELINE_SCORE
    } else {
        composite(
            &ctx.config.effectiveness,
            rate(completed_shifts, assigned_shifts),
            rate(passed_tests, required_tests),
            rate(complete_checklists, assigned_shifts),
        )
    };

    TrainerEffectiveness {
        trainer_id: trainer_id.to_string(),
        score,
        trainee_count: trainees.len(),
        assigned_shifts,
        completed_shifts,
        required_tests,
        passed_tests,
        complete_checklists,
    }
}

/// Effectiveness of every trainer on the roster, best score first
pub fn rank_trainers(
    records: &RecordSet,
    roster: &Roster,
    ctx: &ValidationContext<'_>,
) -> Vec<TrainerEffectiveness> {
    let mut ranked: Vec<TrainerEffectiveness> = roster
        .trainers
        .iter()
        .map(|t| get_trainer_effectiveness(records, &t.id, Some(&roster.store), ctx))
        .collect();
    ranked.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.assigned_shifts.cmp(&a.assigned_shifts))
            .then_with(|| a.trainer_id.cmp(&b.trainer_id))
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{
        attempt_key, Config, RosterTrainer, ShiftKey, ShiftSlot, TemplateCatalog, TestAttempt,
        TestAttempts, TraineeRecord,
    };
    use chrono::Utc;

    fn assigned(trainer: &str) -> ShiftSlot {
        ShiftSlot {
            when: Some(Utc::now()),
            trainer: Some(trainer.to_string()),
            ..Default::default()
        }
    }

    fn completed(trainer: &str) -> ShiftSlot {
        let now = Utc::now();
        ShiftSlot {
            trainer_signed_by: Some(trainer.to_string()),
            trainer_signed_at: Some(now),
            manager_signed_by: Some("m1".to_string()),
            manager_signed_at: Some(now),
            ..assigned(trainer)
        }
    }

    fn set(records: Vec<TraineeRecord>) -> RecordSet {
        records.into_iter().map(|r| (r.id.clone(), r)).collect()
    }

    #[test]
    fn test_no_assigned_shifts_scores_baseline() {
        let config = Config::default();
        let templates = TemplateCatalog::default();
        let attempts = TestAttempts::new();
        let ctx = ValidationContext::new(&config, &templates, &attempts);

        let eff = get_trainer_effectiveness(&RecordSet::new(), "t1", Some("Downtown"), &ctx);
        assert_eq!(eff.score, BASELINE_SCORE);
        assert_eq!(eff.trainee_count, 0);
    }

    #[test]
    fn test_completion_drives_score() {
        let config = Config::default();
        let templates = TemplateCatalog::default();
        let attempts = TestAttempts::new();
        let ctx = ValidationContext::new(&config, &templates, &attempts);

        let r = TraineeRecord::new("Downtown", "1", "Sam", Utc::now())
            .with_slot(ShiftKey::Follow, completed("t1"))
            .with_slot(ShiftKey::Reverse1, assigned("t1"))
            .with_slot(ShiftKey::Reverse2, assigned("t2"));
        let eff = get_trainer_effectiveness(&set(vec![r]), "t1", Some("Downtown"), &ctx);

        assert_eq!(eff.assigned_shifts, 2);
        assert_eq!(eff.completed_shifts, 1);
        assert_eq!(eff.trainee_count, 1);
        // 0.5 * 0.5 + 0.3 * 1.0 + 0.2 * 1.0 = 0.75
        assert_eq!(eff.score, 75);
    }

    #[test]
    fn test_tests_component() {
        let mut config = Config::default();
        config
            .required_tests
            .insert(ShiftKey::Follow, vec!["menu".to_string(), "wine".to_string()]);
        let templates = TemplateCatalog::default();
        let mut attempts = TestAttempts::new();
        attempts.insert(attempt_key("downtown_1", "menu"), TestAttempt::new(90, true, Utc::now()));
        let ctx = ValidationContext::new(&config, &templates, &attempts);

        let r = TraineeRecord::new("Downtown", "1", "Sam", Utc::now())
            .with_slot(ShiftKey::Follow, assigned("t1"));
        let eff = get_trainer_effectiveness(&set(vec![r]), "t1", None, &ctx);
        assert_eq!(eff.required_tests, 2);
        assert_eq!(eff.passed_tests, 1);
        // 0.5 * 0 + 0.3 * 0.5 + 0.2 * 1.0 = 0.35
        assert_eq!(eff.score, 35);
    }

    #[test]
    fn test_store_filter_and_archived() {
        let config = Config::default();
        let templates = TemplateCatalog::default();
        let attempts = TestAttempts::new();
        let ctx = ValidationContext::new(&config, &templates, &attempts);

        let uptown = TraineeRecord::new("Uptown", "1", "Lee", Utc::now())
            .with_slot(ShiftKey::Follow, completed("t1"));
        let mut archived = TraineeRecord::new("Downtown", "2", "Kim", Utc::now())
            .with_slot(ShiftKey::Follow, completed("t1"));
        archived.archived = true;

        let eff = get_trainer_effectiveness(&set(vec![uptown, archived]), "t1", Some("Downtown"), &ctx);
        assert_eq!(eff.assigned_shifts, 0);
        assert_eq!(eff.score, BASELINE_SCORE);
    }

    #[test]
    fn test_zero_weights_fall_back_to_baseline() {
        let mut config = Config::default();
        config.effectiveness = EffectivenessWeights {
            completion: 0.0,
            tests: 0.0,
            checklist: 0.0,
        };
        let templates = TemplateCatalog::default();
        let attempts = TestAttempts::new();
        let ctx = ValidationContext::new(&config, &templates, &attempts);

        let r = TraineeRecord::new("Downtown", "1", "Sam", Utc::now())
            .with_slot(ShiftKey::Follow, completed("t1"));
        assert_eq!(get_trainer_effectiveness(&set(vec![r]), "t1", None, &ctx).score, BASELINE_SCORE);
    }

    #[test]
    fn test_rank_trainers() {
        let config = Config::default();
        let templates = TemplateCatalog::default();
        let attempts = TestAttempts::new();
        let ctx = ValidationContext::new(&config, &templates, &attempts);

        let r = TraineeRecord::new("Downtown", "1", "Sam", Utc::now())
            .with_slot(ShiftKey::Follow, completed("t2"))
            .with_slot(ShiftKey::Reverse1, assigned("t1"));
        let mut roster = Roster::new("Downtown");
        for id in ["t1", "t2", "t3"] {
            roster.trainers.push(RosterTrainer {
                id: id.to_string(),
                name: id.to_uppercase(),
            });
        }

        let ranked = rank_trainers(&set(vec![r]), &roster, &ctx);
        let order: Vec<&str> = ranked.iter().map(|e| e.trainer_id.as_str()).collect();
        assert_eq!(order, vec!["t2", "t1", "t3"]);
        assert_eq!(ranked[0].score, 100);
        assert_eq!(ranked[1].score, 50);
    }
}
