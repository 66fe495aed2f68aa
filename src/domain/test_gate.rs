//! Required knowledge tests per shift
//!
//! A test counts as passed if any attempt by the trainee ever passed.
//! Missing attempt data counts as not passed.

use crate::schemas::{attempt_key, Config, ShiftKey, TestAttempt, TestAttempts};

/// Whether the trainee ever passed the given test
pub fn has_passed_test(trainee_id: &str, test_id: &str, attempts: &TestAttempts) -> bool {
    attempts
        .get(&attempt_key(trainee_id, test_id))
        .is_some_and(TestAttempt::ever_passed)
}

/// Required tests for the shift that the trainee has not passed
pub fn missing_tests(
    config: &Config,
    shift: ShiftKey,
    trainee_id: &str,
    attempts: &TestAttempts,
) -> Vec<String> {
    config
        .tests_for(shift)
        .iter()
        .filter(|test_id| !has_passed_test(trainee_id, test_id, attempts))
        .cloned()
        .collect()
}

/// Whether every required test for the shift has been passed.
///
/// Shifts with no required tests pass vacuously.
pub fn shift_required_tests_passed(
    config: &Config,
    shift: ShiftKey,
    trainee_id: &str,
    attempts: &TestAttempts,
) -> bool {
    missing_tests(config, shift, trainee_id, attempts).is_empty()
}

/// All attempts belonging to one trainee, keyed by test id
pub fn attempts_for_trainee<'a>(
    trainee_id: &str,
    attempts: &'a TestAttempts,
) -> Vec<(&'a str, &'a TestAttempt)> {
    let prefix = format!("{}_", trainee_id);
    attempts
        .range(prefix.clone()..)
        .take_while(|(key, _)| key.starts_with(&prefix))
        .map(|(key, attempt)| (&key[prefix.len()..], attempt))
        .collect()
}

/// Return a new attempt set with `attempt` recorded for the trainee and test.
///
/// An existing attempt is moved into the new attempt's history.
pub fn record_attempt(
    attempts: &TestAttempts,
    trainee_id: &str,
    test_id: &str,
    attempt: TestAttempt,
) -> TestAttempts {
    let key = attempt_key(trainee_id, test_id);
    let mut next = attempts.clone();
    let recorded = match next.remove(&key) {
        Some(previous) => previous.superseded_by(attempt),
        None => attempt,
    };
    next.insert(key, recorded);
    next
}
