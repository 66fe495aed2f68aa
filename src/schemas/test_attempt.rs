//! Test attempt schema - knowledge test results, stored apart from trainee records

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// All attempts keyed by `"<traineeId>_<testId>"`
pub type TestAttempts = BTreeMap<String, TestAttempt>;

/// Build the storage key for a trainee/test pair
pub fn attempt_key(trainee_id: &str, test_id: &str) -> String {
    format!("{}_{}", trainee_id, test_id)
}

/// Summary of a superseded attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptSummary {
    pub score: u8,
    pub passed: bool,
    pub taken_at: DateTime<Utc>,
}

/// The latest attempt at a test, plus earlier attempts in `history`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestAttempt {
    /// Percentage score, 0-100
    pub score: u8,

    pub passed: bool,

    pub taken_at: DateTime<Utc>,

    #[serde(default)]
    pub answers: serde_json::Value,

    /// Earlier attempts, oldest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<AttemptSummary>,
}

impl TestAttempt {
    pub fn new(score: u8, passed: bool, taken_at: DateTime<Utc>) -> Self {
        TestAttempt {
            score: score.min(100),
            passed,
            taken_at,
            answers: serde_json::Value::Null,
            history: Vec::new(),
        }
    }

    /// Whether this or any earlier attempt passed
    pub fn ever_passed(&self) -> bool {
        self.passed || self.history.iter().any(|a| a.passed)
    }

    /// Return a new attempt that supersedes `self`, keeping `self` in the history
    pub fn superseded_by(self, next: TestAttempt) -> TestAttempt {
        let mut history = self.history;
        history.push(AttemptSummary {
            score: self.score,
            passed: self.passed,
            taken_at: self.taken_at,
        });
        history.extend(next.history);
        TestAttempt { history, ..next }
    }
}
