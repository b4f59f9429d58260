//! XDG base directories for the global config file and shared sample data.

use crate::error::ApiError;
use std::path::PathBuf;

/// Application directory name under the XDG roots.
pub const APP_DIR: &str = "tiered-data";

/// `$<var>` when set and non-empty, else `$HOME/<fallback>`.
fn base_dir(var: &str, fallback: &[&str]) -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(var).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    let home = std::env::var_os("HOME").filter(|v| !v.is_empty())?;
    Some(fallback.iter().fold(PathBuf::from(home), |path, part| path.join(part)))
}

/// `$XDG_DATA_HOME`, or `$HOME/.local/share`.
pub fn data_home() -> Option<PathBuf> {
    base_dir("XDG_DATA_HOME", &[".local", "share"])
}

/// `$XDG_CONFIG_HOME`, or `$HOME/.config`.
pub fn config_home() -> Result<PathBuf, ApiError> {
    base_dir("XDG_CONFIG_HOME", &[".config"]).ok_or_else(|| {
        ApiError::ConfigError("Could not determine XDG config home (HOME not set)".to_string())
    })
}

/// Shared sample-data directory for one entity: `<data_home>/tiered-data/<id>`.
///
/// `None` without a home directory. Never creates anything.
pub fn entity_data_dir(entity_id: &str) -> Option<PathBuf> {
    data_home().map(|home| home.join(APP_DIR).join(entity_id))
}

/// `<config_home>/tiered-data/config.toml`
pub fn global_config_path() -> Result<PathBuf, ApiError> {
    Ok(config_home()?.join(APP_DIR).join("config.toml"))
}
