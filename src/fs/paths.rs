//! Path resolution utilities for shiftcert
//!
//! Provides functions to locate the data directory and construct paths
//! to the files inside it.

use std::path::{Path, PathBuf};

use crate::errors::{Result, ShiftcertError};

/// Name of the data directory
pub const DATA_DIR_NAME: &str = ".shiftcert";

/// Find the directory that contains a `.shiftcert` data directory.
///
/// Walks up the directory tree from the starting directory.
///
/// # Arguments
/// * `start_cwd` - The directory to start searching from
///
/// # Errors
/// * `DataDirNotFound` - If no ancestor contains `.shiftcert`
pub fn find_data_root(start_cwd: &Path) -> Result<PathBuf> {
    let mut current = start_cwd
        .canonicalize()
        .map_err(|e| ShiftcertError::DataDirNotFound(format!("Cannot resolve path: {}", e)))?;

    loop {
        if get_data_dir(&current).is_dir() {
            return Ok(current);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => {
                return Err(ShiftcertError::DataDirNotFound(
                    "Could not find a .shiftcert directory; run `shiftcert init` first".to_string(),
                ));
            }
        }
    }
}

/// Resolve the current working directory, optionally using an override.
pub fn resolve_cwd(cwd_option: Option<&Path>) -> PathBuf {
    match cwd_option {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

pub fn get_data_dir(root: &Path) -> PathBuf {
    root.join(DATA_DIR_NAME)
}

pub fn get_config_path(root: &Path) -> PathBuf {
    get_data_dir(root).join("config.json")
}

pub fn get_templates_path(root: &Path) -> PathBuf {
    get_data_dir(root).join("templates.json")
}

pub fn get_attempts_path(root: &Path) -> PathBuf {
    get_data_dir(root).join("test_attempts.json")
}

pub fn get_roster_path(root: &Path) -> PathBuf {
    get_data_dir(root).join("roster.json")
}

pub fn get_trainees_dir(root: &Path) -> PathBuf {
    get_data_dir(root).join("trainees")
}

/// Path to a trainee's record file. Ids that would escape the trainees
/// directory are refused.
pub fn get_trainee_path(root: &Path, id: &str) -> Result<PathBuf> {
    if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
        return Err(ShiftcertError::InvalidArgument(format!(
            "'{}' is not a valid trainee id",
            id
        )));
    }
    Ok(get_trainees_dir(root).join(format!("{}.json", id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_root() -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(".shiftcert")).unwrap();
        temp
    }

    #[test]
    fn test_find_data_root_from_root() {
        let temp = setup_root();
        let root = find_data_root(temp.path()).unwrap();
        assert_eq!(root, temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_find_data_root_from_subdir() {
        let temp = setup_root();
        let subdir = temp.path().join("reports").join("2026");
        std::fs::create_dir_all(&subdir).unwrap();

        let root = find_data_root(&subdir).unwrap();
        assert_eq!(root, temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_find_data_root_ignores_plain_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".shiftcert"), "").unwrap();

        // The walk continues past the temp dir, so only assert the temp dir
        // itself is not returned
        if let Ok(root) = find_data_root(temp.path()) {
            assert_ne!(root, temp.path().canonicalize().unwrap());
        }
    }

    #[test]
    fn test_paths() {
        let root = PathBuf::from("/srv/cafe");
        assert_eq!(get_data_dir(&root), PathBuf::from("/srv/cafe/.shiftcert"));
        assert_eq!(get_config_path(&root), PathBuf::from("/srv/cafe/.shiftcert/config.json"));
        assert_eq!(get_templates_path(&root), PathBuf::from("/srv/cafe/.shiftcert/templates.json"));
        assert_eq!(get_attempts_path(&root), PathBuf::from("/srv/cafe/.shiftcert/test_attempts.json"));
        assert_eq!(get_roster_path(&root), PathBuf::from("/srv/cafe/.shiftcert/roster.json"));
        assert_eq!(
            get_trainee_path(&root, "downtown_00123").unwrap(),
            PathBuf::from("/srv/cafe/.shiftcert/trainees/downtown_00123.json")
        );
    }

    #[test]
    fn test_trainee_path_refuses_escaping_ids() {
        let root = PathBuf::from("/srv/cafe");
        for id in ["downtown_12/7", "..", "downtown_..", "a\\b", ""] {
            let err = get_trainee_path(&root, id).unwrap_err();
            assert!(matches!(err, ShiftcertError::InvalidArgument(_)), "{} accepted", id);
        }
    }

    #[test]
    fn test_resolve_cwd_with_override() {
        let path = PathBuf::from("/custom/path");
        assert_eq!(resolve_cwd(Some(&path)), path);
    }

    #[test]
    fn test_resolve_cwd_without_override() {
        assert!(!resolve_cwd(None).as_os_str().is_empty());
    }
}
