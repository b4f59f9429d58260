//! LocalConfig and root resolution for the local storage tier.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Local storage tier configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalConfig {
    /// Directory that relative candidate paths resolve against. Relative
    /// values are taken relative to the workspace root; `None` means the
    /// workspace root itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

impl LocalConfig {
    /// Resolve the local root against the workspace root.
    pub fn resolve_root(&self, workspace_root: &Path) -> PathBuf {
        match &self.root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => workspace_root.join(root),
            None => workspace_root.to_path_buf(),
        }
    }
}
