//! Init command - create the .shiftcert data directory

use std::path::Path;

use crate::errors::Result;
use crate::fs::{
    get_attempts_path, get_config_path, get_data_dir, get_roster_path, get_templates_path,
    get_trainees_dir, resolve_cwd, write_json,
};
use crate::schemas::{Config, Roster, TemplateCatalog, TestAttempts};

/// Create the data directory layout in `cwd`.
///
/// Existing data files are left alone; `force` only rewrites config.json.
pub async fn run(cwd: Option<&Path>, force: bool) -> Result<()> {
    let root = resolve_cwd(cwd);
    let data_dir = get_data_dir(&root);
    std::fs::create_dir_all(get_trainees_dir(&root))?;

    let config_path = get_config_path(&root);
    if force || !config_path.exists() {
        write_json(&config_path, &Config::default())?;
        tracing::info!(path = %config_path.display(), "wrote default configuration");
    }

    let templates_path = get_templates_path(&root);
    if !templates_path.exists() {
        write_json(&templates_path, &TemplateCatalog::default())?;
    }

    let attempts_path = get_attempts_path(&root);
    if !attempts_path.exists() {
        write_json(&attempts_path, &TestAttempts::new())?;
    }

    let roster_path = get_roster_path(&root);
    if !roster_path.exists() {
        write_json(&roster_path, &Vec::<Roster>::new())?;
    }

    println!("Initialized {}", data_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use crate::fs::find_data_root;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_creates_layout() {
        let temp = TempDir::new().unwrap();
        run(Some(temp.path()), false).await.unwrap();

        assert!(get_trainees_dir(temp.path()).is_dir());
        assert!(get_templates_path(temp.path()).exists());
        assert!(get_attempts_path(temp.path()).exists());
        assert!(get_roster_path(temp.path()).exists());
        assert_eq!(
            find_data_root(temp.path()).unwrap(),
            temp.path().canonicalize().unwrap()
        );
        assert_eq!(load_config(temp.path()).unwrap(), Config::default());
    }

    #[tokio::test]
    async fn test_init_keeps_config_without_force() {
        let temp = TempDir::new().unwrap();
        run(Some(temp.path()), false).await.unwrap();
        std::fs::write(
            get_config_path(temp.path()),
            r#"{"required_shifts": ["follow"]}"#,
        )
        .unwrap();

        run(Some(temp.path()), false).await.unwrap();
        assert_eq!(load_config(temp.path()).unwrap().required_shifts.len(), 1);

        run(Some(temp.path()), true).await.unwrap();
        assert_eq!(load_config(temp.path()).unwrap().required_shifts.len(), 6);
    }
}
