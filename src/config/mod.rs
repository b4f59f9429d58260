//! Configuration
//!
//! `DataConfig` is built once at process start from layered sources and then
//! handed explicitly to provider and registry construction. Nothing on the
//! request path reads configuration from ambient state.

pub mod facade;
pub mod local;
pub mod merge;
pub mod paths;
pub mod remote;
pub mod sources;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub use facade::ConfigLoader;
pub use local::LocalConfig;
pub use paths::xdg_root as xdg;
pub use remote::RemoteCoordinates;

/// Prefix shared by environment overrides (`TIERED_DATA__REMOTE__OWNER`, ...).
pub const ENV_PREFIX: &str = "TIERED_DATA";

/// Workspace-level config file name.
pub const WORKSPACE_CONFIG_FILE: &str = "tiered-data.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Remote repository coordinates for the remote tiers
    #[serde(default)]
    pub remote: RemoteCoordinates,

    /// Local storage tier settings
    #[serde(default)]
    pub local: LocalConfig,

    /// Registered entities keyed by entity id
    #[serde(default)]
    pub entities: BTreeMap<String, EntityConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Per-entity configuration as written in config files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityConfig {
    /// Logical filenames the entity declares
    #[serde(default)]
    pub files: Vec<String>,

    /// Ordered directories checked by the local tier. Empty means the
    /// conventional defaults for the entity id.
    #[serde(default)]
    pub local_candidates: Vec<PathBuf>,

    /// Folder under the remote base path; defaults to the entity id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_folder: Option<String>,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
