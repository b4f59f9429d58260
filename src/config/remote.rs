//! Remote repository coordinates for the remote-raw and remote-api tiers.

use serde::{Deserialize, Serialize};

pub const DEFAULT_RAW_BASE_URL: &str = "https://raw.githubusercontent.com";
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Env vars consulted, in order, when no token is configured.
pub const TOKEN_ENV_VARS: [&str; 2] = ["TIERED_DATA_TOKEN", "GITHUB_TOKEN"];

fn default_branch() -> String {
    "main".to_string()
}

fn default_raw_base_url() -> String {
    DEFAULT_RAW_BASE_URL.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

/// Where remote copies of entity files live.
///
/// A plain value: constructed once and passed into provider construction so
/// tests can point the remote tiers at a fake server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCoordinates {
    #[serde(default)]
    pub owner: String,

    #[serde(default)]
    pub repository: String,

    #[serde(default = "default_branch")]
    pub branch: String,

    /// Path inside the repository under which entity folders live
    #[serde(default)]
    pub base_path: String,

    /// Bearer token for the structured API; falls back to the environment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    #[serde(default = "default_raw_base_url")]
    pub raw_base_url: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl Default for RemoteCoordinates {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repository: String::new(),
            branch: default_branch(),
            base_path: String::new(),
            auth_token: None,
            raw_base_url: default_raw_base_url(),
            api_base_url: default_api_base_url(),
        }
    }
}

impl RemoteCoordinates {
    pub fn new(owner: &str, repository: &str, branch: &str, base_path: &str) -> Self {
        Self {
            owner: owner.to_string(),
            repository: repository.to_string(),
            branch: branch.to_string(),
            base_path: base_path.to_string(),
            ..Self::default()
        }
    }

    /// Whether enough is configured for the remote tiers to attempt a fetch.
    pub fn is_configured(&self) -> bool {
        !self.owner.trim().is_empty() && !self.repository.trim().is_empty()
    }

    /// Configured token, else the first non-empty token env var.
    pub fn resolved_token(&self) -> Option<String> {
        self.auth_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| {
                TOKEN_ENV_VARS
                    .iter()
                    .filter_map(|var| std::env::var(var).ok())
                    .find(|t| !t.trim().is_empty())
            })
    }

    /// Path segments below the repository root for one entity file, in order:
    /// base path, remote folder, filename. Empty segments are dropped.
    pub fn file_segments(&self, remote_folder: &str, filename: &str) -> Vec<String> {
        [self.base_path.as_str(), remote_folder, filename]
            .iter()
            .flat_map(|part| part.split('/'))
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn url_has_scheme(url: &str) -> bool {
        url.starts_with("http://") || url.starts_with("https://")
    }

    /// Validate remote coordinates. Unconfigured coordinates (no owner and no
    /// repository) are valid: the remote tiers then soft-fail.
    pub fn validate(&self) -> Result<(), String> {
        if self.owner.trim().is_empty() != self.repository.trim().is_empty() {
            return Err("Remote owner and repository must be set together".to_string());
        }

        if self.is_configured() && self.branch.trim().is_empty() {
            return Err("Remote branch cannot be empty".to_string());
        }

        for (name, url) in [
            ("raw_base_url", &self.raw_base_url),
            ("api_base_url", &self.api_base_url),
        ] {
            if !Self::url_has_scheme(url.trim()) {
                return Err(format!("Invalid {}: {}", name, url));
            }
        }

        Ok(())
    }
}
