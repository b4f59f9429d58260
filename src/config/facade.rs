//! ConfigLoader facade delegating to merge service.

use super::merge::MergeService;
use super::DataConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from files and environment, then validate it.
    pub fn load(workspace_root: &Path) -> Result<DataConfig, ApiError> {
        let config = MergeService::load(workspace_root)?;
        Self::check(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<DataConfig, ApiError> {
        let config = MergeService::load_from_file(path)?;
        Self::check(config)
    }

    /// Create default configuration.
    pub fn default() -> DataConfig {
        DataConfig::default()
    }

    fn check(config: DataConfig) -> Result<DataConfig, ApiError> {
        config.remote.validate().map_err(ApiError::ConfigError)?;
        Ok(config)
    }
}
