//! File system utilities for shiftcert
//!
//! Provides path resolution, JSON file operations and the file-backed stores.

mod json;
mod paths;
mod store;

pub use json::{
    read_attempts, read_config, read_json, read_json_or_default, read_rosters, read_templates,
    write_attempts, write_json,
};
pub use paths::{
    find_data_root, get_attempts_path, get_config_path, get_data_dir, get_roster_path,
    get_templates_path, get_trainee_path, get_trainees_dir, resolve_cwd, DATA_DIR_NAME,
};
pub use store::{JsonAttemptStore, JsonRecordStore, JsonRosterSource};
