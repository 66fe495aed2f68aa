//! Configuration loading with defaults

use std::path::Path;

use crate::errors::{Result, ShiftcertError};
use crate::fs;
use crate::schemas::Config;

/// Load configuration from the data directory, falling back to defaults.
///
/// Fields missing from config.json take their defaults. The result is
/// validated before it is returned.
///
/// # Errors
/// * `InvalidJson` - If config.json is malformed
/// * `ConfigError` - If the values are unusable
pub fn load_config(root: &Path) -> Result<Config> {
    let config = fs::read_config(root)?;
    validate_config(&config)?;
    tracing::debug!(
        required_shifts = config.required_shifts.len(),
        gated_shifts = config.required_tests.len(),
        "configuration loaded"
    );
    Ok(config)
}

/// Reject configurations the engine cannot work with
pub fn validate_config(config: &Config) -> Result<()> {
    if config.required_shifts.is_empty() {
        return Err(ShiftcertError::ConfigError(
            "required_shifts must name at least one shift".to_string(),
        ));
    }

    let weights = &config.effectiveness;
    let all = [weights.completion, weights.tests, weights.checklist];
    if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(ShiftcertError::ConfigError(
            "effectiveness weights must be finite and non-negative".to_string(),
        ));
    }
    if all.iter().sum::<f64>() <= 0.0 {
        return Err(ShiftcertError::ConfigError(
            "effectiveness weights must not all be zero".to_string(),
        ));
    }

    for (shift, tests) in &config.required_tests {
        if tests.iter().any(|t| t.trim().is_empty()) {
            return Err(ShiftcertError::ConfigError(format!(
                "required_tests for {} contains an empty test id",
                shift
            )));
        }
    }

    Ok(())
}
