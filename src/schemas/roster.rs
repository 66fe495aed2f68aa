//! Roster schema - trainers per store, imported from the point-of-sale system

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A trainer on a store roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterTrainer {
    /// Trainer id as used in shift slots
    pub id: String,

    pub name: String,
}

/// Trainer roster for one store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    /// Schema version for forward compatibility
    pub schema_version: u32,

    pub store: String,

    pub trainers: Vec<RosterTrainer>,

    /// When the roster was imported
    pub generated_at: DateTime<Utc>,
}

impl Roster {
    /// Create an empty roster for a store
    pub fn new(store: impl Into<String>) -> Self {
        Roster {
            schema_version: 1,
            store: store.into(),
            trainers: Vec::new(),
            generated_at: Utc::now(),
        }
    }

    pub fn trainer(&self, id: &str) -> Option<&RosterTrainer> {
        self.trainers.iter().find(|t| t.id == id)
    }
}
