//! End-to-end workflow scenarios against the public library API

use chrono::{DateTime, Duration, TimeZone, Utc};
use shiftcert::domain::{
    add_trainee, all_shift_statuses, approve_claim, claim_shift, get_coverage_shifts,
    get_pending_claims_for_trainer, get_shift_status, is_trainee_certified, manager_sign_off,
    record_attempt, schedule_shift, trainer_sign_off, update_checklist_item, SignOffInput,
    ValidationContext,
};
use shiftcert::fs::JsonRecordStore;
use shiftcert::schemas::{
    ChecklistTemplate, ClaimState, Config, ItemKind, ItemValue, Readiness, RecordSet, ShiftKey,
    TemplateCatalog, TemplateItem, TemplateSection, TestAttempt, TestAttempts,
};
use shiftcert::store::{persist_changes, RecordStore};

const TRAINEE: &str = "downtown_00123";
const STORE: &str = "Downtown";

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap()
}

fn with_trainee() -> RecordSet {
    add_trainee(&RecordSet::new(), STORE, "00123", "Sam Rivera", t0()).into_records()
}

fn scheduled(shift: ShiftKey) -> RecordSet {
    let records = with_trainee();
    let when = t0() + Duration::days(1);
    let result = schedule_shift(&records, TRAINEE, shift, Some(when), None, t0());
    assert!(result.is_applied());
    result.into_records()
}

fn gated_templates() -> TemplateCatalog {
    TemplateCatalog::new(ShiftKey::default_required().into_iter().map(|shift| ChecklistTemplate {
        shift,
        title: shift.label().to_string(),
        sections: vec![TemplateSection {
            title: "Service".to_string(),
            items: vec![
                TemplateItem {
                    id: "greets".to_string(),
                    label: "Greets within one minute".to_string(),
                    kind: ItemKind::Checkbox,
                    required: true,
                },
                TemplateItem {
                    id: "upsell".to_string(),
                    label: "Suggests a starter".to_string(),
                    kind: ItemKind::Rating { max: 3 },
                    required: false,
                },
            ],
        }],
    }))
}

fn gated_config() -> Config {
    let mut config = Config::default();
    config
        .required_tests
        .insert(ShiftKey::Follow, vec!["menu".to_string()]);
    config
}

#[test]
fn scenario_a_open_shift_needs_coverage() {
    let records = scheduled(ShiftKey::Follow);
    let status = get_shift_status(&records[TRAINEE], ShiftKey::Follow);
    assert!(status.scheduled);
    assert!(!status.trainer_signed);
    assert!(!status.complete);

    let coverage = get_coverage_shifts(&records, STORE, false);
    assert_eq!(coverage.len(), 1);
    assert_eq!(coverage[0].trainee_id, TRAINEE);
    assert_eq!(coverage[0].shift, ShiftKey::Follow);
    assert!(!coverage[0].is_pending);
}

#[test]
fn scenario_b_claim_is_pending() {
    let records = scheduled(ShiftKey::Follow);
    let records = claim_shift(&records, TRAINEE, ShiftKey::Follow, "t1", t0()).into_records();

    let slot = records[TRAINEE].slot(ShiftKey::Follow).unwrap();
    assert_eq!(slot.claim_state(), ClaimState::PendingClaim("t1".to_string()));

    let claims = get_pending_claims_for_trainer(&records, "t1");
    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0].shift, ShiftKey::Follow);
    assert!(get_pending_claims_for_trainer(&records, "t2").is_empty());

    let coverage = get_coverage_shifts(&records, STORE, true);
    assert_eq!(coverage.len(), 1);
    assert!(coverage[0].is_pending);
    assert!(get_coverage_shifts(&records, STORE, false).is_empty());
}

#[test]
fn scenario_c_approval_assigns() {
    let records = scheduled(ShiftKey::Follow);
    let records = claim_shift(&records, TRAINEE, ShiftKey::Follow, "t1", t0()).into_records();
    let records = approve_claim(&records, TRAINEE, ShiftKey::Follow, t0()).into_records();

    let slot = records[TRAINEE].slot(ShiftKey::Follow).unwrap();
    assert_eq!(slot.trainer.as_deref(), Some("t1"));
    assert_eq!(slot.claim_state(), ClaimState::Assigned("t1".to_string()));
    assert!(get_coverage_shifts(&records, STORE, true).is_empty());
    assert!(get_pending_claims_for_trainer(&records, "t1").is_empty());
}

fn assigned_follow() -> RecordSet {
    let records = scheduled(ShiftKey::Follow);
    let records = claim_shift(&records, TRAINEE, ShiftKey::Follow, "t1", t0()).into_records();
    approve_claim(&records, TRAINEE, ShiftKey::Follow, t0()).into_records()
}

#[test]
fn scenario_d_sign_off_blocked_by_checklist() {
    let config = Config::default();
    let templates = gated_templates();
    let attempts = TestAttempts::new();
    let ctx = ValidationContext::new(&config, &templates, &attempts);

    let records = assigned_follow();
    let result = trainer_sign_off(
        &records,
        &ctx,
        TRAINEE,
        ShiftKey::Follow,
        "t1",
        SignOffInput::default(),
        t0(),
    );
    assert!(result.is_rejected());
    assert!(result.reason().unwrap().contains("greets"));
    let slot = result.records()[TRAINEE].slot(ShiftKey::Follow).unwrap();
    assert!(slot.trainer_signed_at.is_none());
    assert_eq!(result.into_records(), records);
}

#[test]
fn scenario_e_trainer_sign_off_with_readiness() {
    let config = gated_config();
    let templates = gated_templates();
    let attempts = record_attempt(
        &TestAttempts::new(),
        TRAINEE,
        "menu",
        TestAttempt::new(92, true, t0()),
    );
    let ctx = ValidationContext::new(&config, &templates, &attempts);

    let records = update_checklist_item(
        &assigned_follow(),
        &templates,
        TRAINEE,
        ShiftKey::Follow,
        "greets",
        ItemValue::Checkbox(true),
        "t1",
        t0(),
    )
    .into_records();

    let input = SignOffInput {
        readiness: Readiness {
            knowledge: Some(4),
            execution: Some(5),
            confidence: Some(4),
        },
        ..Default::default()
    };
    let signed_at = t0() + Duration::hours(6);
    let result = trainer_sign_off(&records, &ctx, TRAINEE, ShiftKey::Follow, "t1", input, signed_at);
    assert!(result.is_applied());
    let records = result.into_records();

    let record = &records[TRAINEE];
    let slot = record.slot(ShiftKey::Follow).unwrap();
    assert_eq!(slot.trainer_signed_at, Some(signed_at));
    let readiness = record.checklist(ShiftKey::Follow).unwrap().readiness;
    assert_eq!(readiness.knowledge, Some(4));
    assert_eq!(readiness.execution, Some(5));
    assert_eq!(readiness.confidence, Some(4));

    let status = get_shift_status(record, ShiftKey::Follow);
    assert!(status.trainer_signed);
    assert!(!status.complete);

    let records = manager_sign_off(&records, &config, TRAINEE, ShiftKey::Follow, "m1", signed_at)
        .into_records();
    assert!(get_shift_status(&records[TRAINEE], ShiftKey::Follow).complete);
}

#[test]
fn scenario_e_untaken_test_blocks_sign_off() {
    let config = gated_config();
    let templates = TemplateCatalog::default();
    let attempts = TestAttempts::new();
    let ctx = ValidationContext::new(&config, &templates, &attempts);

    let result = trainer_sign_off(
        &assigned_follow(),
        &ctx,
        TRAINEE,
        ShiftKey::Follow,
        "t1",
        SignOffInput::default(),
        t0(),
    );
    assert!(result.is_rejected());
    assert!(result.reason().unwrap().contains("menu"));
}

/// Drive every required shift to completion
fn certify(records: RecordSet, ctx: &ValidationContext<'_>) -> RecordSet {
    let mut records = records;
    for (i, shift) in ShiftKey::default_required().into_iter().enumerate() {
        let at = t0() + Duration::days(i as i64 + 1);
        records = schedule_shift(&records, TRAINEE, shift, Some(at), Some("t1"), at).into_records();
        records = trainer_sign_off(&records, ctx, TRAINEE, shift, "t1", SignOffInput::default(), at)
            .into_records();
        records = manager_sign_off(&records, ctx.config, TRAINEE, shift, "m1", at).into_records();
    }
    records
}

#[test]
fn scenario_f_all_required_shifts_certify() {
    let config = Config::default();
    let templates = TemplateCatalog::default();
    let attempts = TestAttempts::new();
    let ctx = ValidationContext::new(&config, &templates, &attempts);

    let before = with_trainee();
    assert!(!is_trainee_certified(&before[TRAINEE], &config.required_shifts));

    let records = certify(before, &ctx);
    let record = &records[TRAINEE];
    assert!(is_trainee_certified(record, &config.required_shifts));
    assert_eq!(record.certified, Some(true));
    assert!(record.slot(ShiftKey::FoodRunning).is_none());
}

#[test]
fn json_round_trip_preserves_statuses() {
    let config = Config::default();
    let templates = TemplateCatalog::default();
    let attempts = TestAttempts::new();
    let ctx = ValidationContext::new(&config, &templates, &attempts);

    let records = certify(with_trainee(), &ctx);
    let records = schedule_shift(
        &records,
        TRAINEE,
        ShiftKey::FoodRunning,
        Some(t0() + Duration::days(10)),
        None,
        t0(),
    )
    .into_records();

    let json = serde_json::to_string(&records).unwrap();
    let back: RecordSet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, records);
    assert_eq!(
        all_shift_statuses(&back[TRAINEE]),
        all_shift_statuses(&records[TRAINEE])
    );
}

#[test]
fn file_store_persists_changed_records() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut store = JsonRecordStore::new(temp.path());

    let before = RecordSet::new();
    let after = with_trainee();
    let report = persist_changes(&mut store, &before, &after);
    assert!(report.is_success());
    assert_eq!(report.written, vec![TRAINEE.to_string()]);

    let claimed = claim_shift(
        &scheduled(ShiftKey::Follow),
        TRAINEE,
        ShiftKey::Follow,
        "t1",
        t0(),
    )
    .into_records();
    persist_changes(&mut store, &after, &claimed);

    let loaded = store.get_all().unwrap();
    assert_eq!(loaded, claimed);
    assert_eq!(
        loaded[TRAINEE].slot(ShiftKey::Follow).unwrap().claim_state(),
        ClaimState::PendingClaim("t1".to_string())
    );
}

#[test]
fn employee_number_cannot_escape_trainee_dir() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut store = JsonRecordStore::new(temp.path());

    let result = add_trainee(&RecordSet::new(), STORE, "12/7", "Sam Rivera", t0());
    assert!(result.is_rejected());
    let report = persist_changes(&mut store, &RecordSet::new(), result.records());
    assert!(report.written.is_empty());

    let after = with_trainee();
    persist_changes(&mut store, &RecordSet::new(), &after);
    assert_eq!(store.get_all().unwrap(), after);
}

#[test]
fn corrupt_record_is_never_overwritten() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut store = JsonRecordStore::new(temp.path());
    persist_changes(&mut store, &RecordSet::new(), &with_trainee());

    let path = temp
        .path()
        .join(".shiftcert")
        .join("trainees")
        .join(format!("{}.json", TRAINEE));
    std::fs::write(&path, "{\"id\": \"downtown_00123\", \"name\"").unwrap();

    assert!(store.get_all().is_err());
    assert!(std::fs::read_to_string(&path).unwrap().ends_with("\"name\""));
}
