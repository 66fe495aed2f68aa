//! Config schema - Configuration for shiftcert

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ShiftKey;

/// Weights of the three trainer effectiveness components.
///
/// They are normalized by their sum, so only their ratio matters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectivenessWeights {
    /// Share of assigned shifts that reached `complete`
    #[serde(default = "default_completion_weight")]
    pub completion: f64,

    /// Share of required tests passed by the trainer's trainees
    #[serde(default = "default_tests_weight")]
    pub tests: f64,

    /// Share of assigned shifts with a complete checklist
    #[serde(default = "default_checklist_weight")]
    pub checklist: f64,
}

fn default_completion_weight() -> f64 {
    0.5
}

fn default_tests_weight() -> f64 {
    0.3
}

fn default_checklist_weight() -> f64 {
    0.2
}

impl Default for EffectivenessWeights {
    fn default() -> Self {
        EffectivenessWeights {
            completion: default_completion_weight(),
            tests: default_tests_weight(),
            checklist: default_checklist_weight(),
        }
    }
}

/// Main configuration for shiftcert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Shift keys that must all be complete for certification
    #[serde(default = "ShiftKey::default_required")]
    pub required_shifts: Vec<ShiftKey>,

    /// Test ids that must be passed before a shift can be trainer-signed
    #[serde(default)]
    pub required_tests: BTreeMap<ShiftKey, Vec<String>>,

    #[serde(default)]
    pub effectiveness: EffectivenessWeights,

    /// How long an imported trainer roster stays fresh
    #[serde(default = "default_roster_cache_ttl_seconds")]
    pub roster_cache_ttl_seconds: u64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_roster_cache_ttl_seconds() -> u64 {
    900
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema_version: 1,
            required_shifts: ShiftKey::default_required(),
            required_tests: BTreeMap::new(),
            effectiveness: EffectivenessWeights::default(),
            roster_cache_ttl_seconds: default_roster_cache_ttl_seconds(),
        }
    }
}

impl Config {
    /// Required test ids for a shift; empty when none are configured
    pub fn tests_for(&self, shift: ShiftKey) -> &[String] {
        self.required_tests
            .get(&shift)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
