//! JSON file operations
//!
//! Every data file is pretty-printed JSON validated through serde on read.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{Result, ShiftcertError};
use crate::schemas::{Config, Roster, TemplateCatalog, TestAttempts};

use super::paths::{get_attempts_path, get_config_path, get_roster_path, get_templates_path};

/// Read and deserialize a JSON file.
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidJson` - If the file is not valid JSON for `T`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ShiftcertError::FileNotFound(format!("File not found: {}", path.display()))
        } else {
            ShiftcertError::Io(e)
        }
    })?;

    serde_json::from_str(&content).map_err(|e| {
        ShiftcertError::InvalidJson(format!("Invalid JSON in file {}: {}", path.display(), e))
    })
}

/// Read a JSON file, falling back to `T::default()` when it is absent.
pub fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    read_json(path)
}

/// Write a value to a JSON file with pretty formatting.
///
/// Uses atomic write (write to temp file, then rename) to avoid partial writes.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(data)
        .map_err(|e| ShiftcertError::InvalidJson(e.to_string()))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Read config.json, or the default configuration if it doesn't exist
pub fn read_config(root: &Path) -> Result<Config> {
    read_json_or_default(&get_config_path(root))
}

/// Read templates.json; an absent file yields an empty catalog
pub fn read_templates(root: &Path) -> Result<TemplateCatalog> {
    read_json_or_default(&get_templates_path(root))
}

/// Read test_attempts.json; an absent file yields no attempts
pub fn read_attempts(root: &Path) -> Result<TestAttempts> {
    read_json_or_default(&get_attempts_path(root))
}

pub fn write_attempts(root: &Path, attempts: &TestAttempts) -> Result<()> {
    write_json(&get_attempts_path(root), attempts)
}

/// Read roster.json, a list of per-store rosters
pub fn read_rosters(root: &Path) -> Result<Vec<Roster>> {
    read_json_or_default(&get_roster_path(root))
}
