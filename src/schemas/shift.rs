//! Shift schema - canonical shift keys and the per-shift slot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stage of the certification sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftKey {
    /// Trainee shadows a trainer
    Follow,
    /// First reverse shift (trainer shadows trainee)
    #[serde(rename = "reverse_1")]
    Reverse1,
    #[serde(rename = "reverse_2")]
    Reverse2,
    #[serde(rename = "reverse_3")]
    Reverse3,
    #[serde(rename = "reverse_4")]
    Reverse4,
    /// Food-running shift, not required for certification by default
    FoodRunning,
    /// Final certification shift
    Certification,
}

/// The canonical ordering of shift keys.
pub const SHIFT_KEYS: &[ShiftKey] = &[
    ShiftKey::Follow,
    ShiftKey::Reverse1,
    ShiftKey::Reverse2,
    ShiftKey::Reverse3,
    ShiftKey::Reverse4,
    ShiftKey::FoodRunning,
    ShiftKey::Certification,
];

impl ShiftKey {
    /// Whether the shift is optional in the canonical sequence
    pub fn is_optional(self) -> bool {
        self == ShiftKey::FoodRunning
    }

    /// Keys required for certification when no configuration overrides them
    pub fn default_required() -> Vec<ShiftKey> {
        SHIFT_KEYS.iter().copied().filter(|k| !k.is_optional()).collect()
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            ShiftKey::Follow => "Follow Shift",
            ShiftKey::Reverse1 => "1st Reverse",
            ShiftKey::Reverse2 => "2nd Reverse",
            ShiftKey::Reverse3 => "3rd Reverse",
            ShiftKey::Reverse4 => "4th Reverse",
            ShiftKey::FoodRunning => "Food Running",
            ShiftKey::Certification => "Certification Shift",
        }
    }
}

impl std::fmt::Display for ShiftKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShiftKey::Follow => write!(f, "follow"),
            ShiftKey::Reverse1 => write!(f, "reverse_1"),
            ShiftKey::Reverse2 => write!(f, "reverse_2"),
            ShiftKey::Reverse3 => write!(f, "reverse_3"),
            ShiftKey::Reverse4 => write!(f, "reverse_4"),
            ShiftKey::FoodRunning => write!(f, "food_running"),
            ShiftKey::Certification => write!(f, "certification"),
        }
    }
}

impl std::str::FromStr for ShiftKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "follow" => Ok(ShiftKey::Follow),
            "reverse_1" => Ok(ShiftKey::Reverse1),
            "reverse_2" => Ok(ShiftKey::Reverse2),
            "reverse_3" => Ok(ShiftKey::Reverse3),
            "reverse_4" => Ok(ShiftKey::Reverse4),
            "food_running" => Ok(ShiftKey::FoodRunning),
            "certification" => Ok(ShiftKey::Certification),
            _ => Err(format!("Unknown shift key: {}", s)),
        }
    }
}

/// A trainer's request to be assigned to a shift
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    /// Requesting trainer id
    pub trainer: String,

    /// When the claim was made
    pub at: DateTime<Utc>,
}

/// Claim sub-state derived from a slot's fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimState {
    /// No scheduled time yet
    Unscheduled,
    /// Scheduled, nobody assigned or claiming
    Open,
    /// A trainer asked for the shift and awaits approval
    PendingClaim(String),
    /// A trainer is assigned
    Assigned(String),
}

/// Per-shift scheduling and sign-off data for one trainee
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSlot {
    /// Scheduled start of the shift
    #[serde(default)]
    pub when: Option<DateTime<Utc>>,

    /// Assigned trainer id
    #[serde(default)]
    pub trainer: Option<String>,

    #[serde(default)]
    pub trainer_signed_by: Option<String>,

    #[serde(default)]
    pub trainer_signed_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub manager_signed_by: Option<String>,

    #[serde(default)]
    pub manager_signed_at: Option<DateTime<Utc>>,

    /// Outstanding claim awaiting manager approval
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_claim: Option<ClaimRequest>,

    /// The claim that led to the current assignment, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_claim: Option<ClaimRequest>,

    /// When `when` was last edited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_set_at: Option<DateTime<Utc>>,

    /// When `trainer` was last set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_at: Option<DateTime<Utc>>,
}

impl ShiftSlot {
    pub fn is_scheduled(&self) -> bool {
        self.when.is_some()
    }

    pub fn is_trainer_signed(&self) -> bool {
        self.trainer_signed_at.is_some()
    }

    pub fn is_manager_signed(&self) -> bool {
        self.manager_signed_at.is_some()
    }

    /// Derive the claim sub-state. An assigned trainer wins over a stale pending claim.
    pub fn claim_state(&self) -> ClaimState {
        if let Some(trainer) = &self.trainer {
            return ClaimState::Assigned(trainer.clone());
        }
        if let Some(claim) = &self.pending_claim {
            return ClaimState::PendingClaim(claim.trainer.clone());
        }
        if self.is_scheduled() {
            ClaimState::Open
        } else {
            ClaimState::Unscheduled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_key_serialization() {
        assert_eq!(serde_json::to_string(&ShiftKey::Follow).unwrap(), "\"follow\"");
        assert_eq!(serde_json::to_string(&ShiftKey::Reverse3).unwrap(), "\"reverse_3\"");
        assert_eq!(serde_json::to_string(&ShiftKey::FoodRunning).unwrap(), "\"food_running\"");
        assert_eq!(
            serde_json::from_str::<ShiftKey>("\"certification\"").unwrap(),
            ShiftKey::Certification
        );
    }

    #[test]
    fn test_shift_key_display_matches_from_str() {
        for key in SHIFT_KEYS {
            assert_eq!(key.to_string().parse::<ShiftKey>().unwrap(), *key);
        }
        assert!("reverse_9".parse::<ShiftKey>().is_err());
    }

    #[test]
    fn test_default_required_excludes_optional() {
        let required = ShiftKey::default_required();
        assert_eq!(required.len(), 6);
        assert!(!required.contains(&ShiftKey::FoodRunning));
        assert_eq!(SHIFT_KEYS.len(), 7);
    }

    #[test]
    fn test_claim_state_derivation() {
        let mut slot = ShiftSlot::default();
        assert_eq!(slot.claim_state(), ClaimState::Unscheduled);

        slot.when = Some(Utc::now());
        assert_eq!(slot.claim_state(), ClaimState::Open);

        slot.pending_claim = Some(ClaimRequest {
            trainer: "t1".to_string(),
            at: Utc::now(),
        });
        assert_eq!(slot.claim_state(), ClaimState::PendingClaim("t1".to_string()));

        slot.trainer = Some("t2".to_string());
        assert_eq!(slot.claim_state(), ClaimState::Assigned("t2".to_string()));
    }

    #[test]
    fn test_slot_tolerates_missing_fields() {
        let slot: ShiftSlot = serde_json::from_str("{}").unwrap();
        assert!(!slot.is_scheduled());
        assert!(!slot.is_trainer_signed());
        assert!(!slot.is_manager_signed());
    }
}
