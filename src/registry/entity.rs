//! Entity descriptors: the read-only metadata the resolver consumes.

use crate::config::{xdg, EntityConfig};
use serde::Serialize;
use std::path::PathBuf;

/// Conventional local directories for an entity, in priority order.
pub fn default_local_candidates(entity_id: &str) -> Vec<PathBuf> {
    let mut candidates = vec![
        PathBuf::from("data").join(entity_id),
        PathBuf::from("agents").join(entity_id).join("data"),
        PathBuf::from("sample-data").join(entity_id),
    ];
    if let Some(shared) = xdg::entity_data_dir(entity_id) {
        candidates.push(shared);
    }
    candidates
}

/// A registered entity and the locations its files may be found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityDescriptor {
    pub entity_id: String,
    /// Declared logical filenames, in declaration order
    pub files: Vec<String>,
    /// Ordered local candidate directories
    pub local_candidates: Vec<PathBuf>,
    /// Folder name under the remote base path
    pub remote_folder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EntityDescriptor {
    /// Descriptor with conventional candidates and remote folder = entity id.
    pub fn new(entity_id: &str, files: &[&str]) -> Self {
        Self {
            entity_id: entity_id.to_string(),
            files: files.iter().map(|f| f.to_string()).collect(),
            local_candidates: default_local_candidates(entity_id),
            remote_folder: entity_id.to_string(),
            description: None,
        }
    }

    /// Replace the local candidate list.
    pub fn with_local_candidates<I, P>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.local_candidates = candidates.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_remote_folder(mut self, folder: &str) -> Self {
        self.remote_folder = folder.to_string();
        self
    }

    /// Build from config, applying defaults for empty candidates and a
    /// missing remote folder.
    pub fn from_config(entity_id: &str, config: &EntityConfig) -> Self {
        let local_candidates = if config.local_candidates.is_empty() {
            default_local_candidates(entity_id)
        } else {
            config.local_candidates.clone()
        };

        Self {
            entity_id: entity_id.to_string(),
            files: config.files.clone(),
            local_candidates,
            remote_folder: config
                .remote_folder
                .clone()
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| entity_id.to_string()),
            description: config.description.clone(),
        }
    }

    /// Whether the entity declares this logical filename.
    pub fn declares(&self, filename: &str) -> bool {
        self.files.iter().any(|f| f == filename)
    }
}
