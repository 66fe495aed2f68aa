//! Trainee schema - the durable per-trainee record

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{ChecklistInstance, ShiftKey, ShiftSlot};

/// Full snapshot of trainee records keyed by trainee id
pub type RecordSet = BTreeMap<String, TraineeRecord>;

/// A free-text note left on a trainee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
    pub at: DateTime<Utc>,
    pub author: String,
}

/// Legacy manual ("verbal") certification recorded outside the shift workflow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbalCert {
    #[serde(default)]
    pub completed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<DateTime<Utc>>,
}

/// Trainer's written feedback for one shift
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftFeedback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strengths: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opportunities: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals_next: Option<String>,
}

impl ShiftFeedback {
    pub fn is_empty(&self) -> bool {
        self.strengths.is_none() && self.opportunities.is_none() && self.goals_next.is_none()
    }
}

/// One trainee's certification record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraineeRecord {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Stable id derived from store and employee number
    pub id: String,

    pub employee_number: String,

    pub name: String,

    pub store: String,

    #[serde(default)]
    pub archived: bool,

    /// Cached certification flag. `None` means never derived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certified: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certified_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbal_cert: Option<VerbalCert>,

    #[serde(default)]
    pub notes: Vec<Note>,

    #[serde(default)]
    pub schedule: BTreeMap<ShiftKey, ShiftSlot>,

    #[serde(default)]
    pub checklists: BTreeMap<ShiftKey, ChecklistInstance>,

    #[serde(default)]
    pub feedback: BTreeMap<ShiftKey, ShiftFeedback>,

    pub created_at: DateTime<Utc>,
}

fn default_schema_version() -> u32 {
    1
}

fn slug_pattern() -> &'static Regex {
    static SLUG: OnceLock<Regex> = OnceLock::new();
    SLUG.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("static slug pattern"))
}

fn employee_number_pattern() -> &'static Regex {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    NUMBER.get_or_init(|| Regex::new(r"^[A-Za-z0-9-]+$").expect("static employee number pattern"))
}

/// Employee numbers are letters, digits and dashes only. They end up in the
/// trainee id, which doubles as a file name and an attempt key prefix.
pub fn is_valid_employee_number(employee_number: &str) -> bool {
    employee_number_pattern().is_match(employee_number.trim())
}

/// Derive the stable trainee id from store name and employee number.
///
/// `"Main Street #4"`, `"00123"` becomes `"main-street-4_00123"`.
pub fn trainee_id(store: &str, employee_number: &str) -> String {
    let lowered = store.to_lowercase();
    let slug = slug_pattern().replace_all(&lowered, "-");
    format!("{}_{}", slug.trim_matches('-'), employee_number.trim())
}

impl TraineeRecord {
    /// Create a new trainee with an empty schedule
    pub fn new(store: &str, employee_number: &str, name: &str, now: DateTime<Utc>) -> Self {
        TraineeRecord {
            schema_version: 1,
            id: trainee_id(store, employee_number),
            employee_number: employee_number.trim().to_string(),
            name: name.trim().to_string(),
            store: store.to_string(),
            archived: false,
            certified: None,
            certified_at: None,
            verbal_cert: None,
            notes: Vec::new(),
            schedule: BTreeMap::new(),
            checklists: BTreeMap::new(),
            feedback: BTreeMap::new(),
            created_at: now,
        }
    }

    pub fn slot(&self, shift: ShiftKey) -> Option<&ShiftSlot> {
        self.schedule.get(&shift)
    }

    pub fn checklist(&self, shift: ShiftKey) -> Option<&ChecklistInstance> {
        self.checklists.get(&shift)
    }

    // ===== IMMUTABLE BUILDER METHODS =====

    /// Return a new record with the slot for `shift` replaced
    pub fn with_slot(mut self, shift: ShiftKey, slot: ShiftSlot) -> Self {
        self.schedule.insert(shift, slot);
        self
    }

    /// Return a new record with the checklist for `shift` replaced
    pub fn with_checklist(mut self, shift: ShiftKey, checklist: ChecklistInstance) -> Self {
        self.checklists.insert(shift, checklist);
        self
    }

    /// Return a new record with the feedback for `shift` replaced
    pub fn with_feedback(mut self, shift: ShiftKey, feedback: ShiftFeedback) -> Self {
        if feedback.is_empty() {
            self.feedback.remove(&shift);
        } else {
            self.feedback.insert(shift, feedback);
        }
        self
    }

    /// Return a new record with a note appended
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }
}
