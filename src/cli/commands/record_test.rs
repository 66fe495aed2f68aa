//! Record-test command - store a knowledge test attempt

use std::path::Path;

use chrono::Utc;

use crate::cli::Workspace;
use crate::domain::record_attempt;
use crate::errors::{Result, ShiftcertError};
use crate::schemas::TestAttempt;

/// Record an attempt; earlier attempts move into the attempt history
pub async fn run(cwd: Option<&Path>, trainee: &str, test: &str, score: u8, passed: bool) -> Result<()> {
    if score > 100 {
        return Err(ShiftcertError::InvalidArgument(format!(
            "score must be 0-100, got {}",
            score
        )));
    }
    if test.trim().is_empty() {
        return Err(ShiftcertError::InvalidArgument("test id is empty".to_string()));
    }

    let mut ws = Workspace::open(cwd)?;
    ws.record(trainee)?;

    let attempts = record_attempt(
        &ws.attempts,
        trainee,
        test,
        TestAttempt::new(score, passed, Utc::now()),
    );
    ws.save_attempts(attempts)?;
    tracing::info!(trainee, test, score, passed, "test attempt recorded");

    let outcome = if passed { "passed" } else { "failed" };
    println!("{} {} {} ({}%)", trainee, outcome, test, score);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::trainee;
    use crate::domain::has_passed_test;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_pass_is_sticky() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(".shiftcert")).unwrap();
        let cwd = Some(temp.path());
        trainee::add(cwd, "Downtown", "1", "Sam").await.unwrap();

        run(cwd, "downtown_1", "menu", 95, true).await.unwrap();
        run(cwd, "downtown_1", "menu", 40, false).await.unwrap();

        let ws = Workspace::open(cwd).unwrap();
        assert!(has_passed_test("downtown_1", "menu", &ws.attempts));
        assert_eq!(ws.attempts["downtown_1_menu"].history.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_trainee() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(".shiftcert")).unwrap();
        let err = run(Some(temp.path()), "nobody", "menu", 80, true).await.unwrap_err();
        assert_eq!(err.code(), "TRAINEE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_score_out_of_range() {
        let err = run(None, "downtown_1", "menu", 120, true).await.unwrap_err();
        assert!(matches!(err, ShiftcertError::InvalidArgument(_)));
    }
}
