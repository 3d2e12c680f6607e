//! Configuration and data directory resolution.
//!
//! Environment overrides win; otherwise the platform locations from the
//! `directories` crate are used (e.g. `~/.config/pixsearch` and
//! `~/.local/share/pixsearch` on Linux).

use crate::domain::error::{PixsearchError, Result};
use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "pixsearch";
const APPLICATION: &str = "pixsearch";

/// Overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "PIXSEARCH_CONFIG_DIR";

/// Overrides the data directory (trace files).
pub const DATA_DIR_ENV: &str = "PIXSEARCH_DATA_DIR";

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
        PixsearchError::Config("unable to determine a home directory".to_string())
    })
}

/// Reads a directory override. Empty values count as unset.
fn dir_from_env(name: &str) -> Option<PathBuf> {
    let value = env::var_os(name)?;
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

/// Directory holding `config.toml`.
///
/// # Errors
///
/// Returns [`PixsearchError::Config`] when no override is set and the platform
/// home directory cannot be determined.
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(dir) = dir_from_env(CONFIG_DIR_ENV) {
        return Ok(dir);
    }
    Ok(project_dirs()?.config_dir().to_path_buf())
}

/// Directory for trace files.
///
/// # Errors
///
/// Same as [`get_config_dir`].
pub fn get_data_dir() -> Result<PathBuf> {
    if let Some(dir) = dir_from_env(DATA_DIR_ENV) {
        return Ok(dir);
    }
    Ok(project_dirs()?.data_local_dir().to_path_buf())
}

/// Default location of the configuration file.
///
/// # Errors
///
/// Same as [`get_config_dir`].
pub fn default_config_file() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.toml"))
}
