//! Local storage tier: first readable candidate path wins.

use super::{ResolutionOutcome, SourceProvider};
use crate::registry::EntityDescriptor;
use crate::resolver::DataRequest;
use crate::types::SourceTag;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

pub const TIER: &str = "local";

#[derive(Debug, Clone, Default)]
pub struct LocalStorageProvider {
    /// Base for relative candidate directories; `None` leaves them relative
    /// to the process working directory.
    root: Option<PathBuf>,
}

impl LocalStorageProvider {
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Candidate file paths for a request, in priority order.
    pub fn candidate_paths(&self, entity: &EntityDescriptor, filename: &str) -> Vec<PathBuf> {
        entity
            .local_candidates
            .iter()
            .map(|dir| match &self.root {
                Some(root) if dir.is_relative() => root.join(dir).join(filename),
                _ => dir.join(filename),
            })
            .collect()
    }
}

#[async_trait]
impl SourceProvider for LocalStorageProvider {
    fn tier(&self) -> &'static str {
        TIER
    }

    async fn attempt(
        &self,
        request: &DataRequest,
        entity: &EntityDescriptor,
    ) -> ResolutionOutcome {
        let candidates = self.candidate_paths(entity, &request.logical_filename);
        let mut unreadable = 0usize;

        for path in &candidates {
            let raw = match tokio::fs::read_to_string(path).await {
                Ok(raw) => raw,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    // Unreadable candidates don't count; the next one may still answer.
                    debug!(
                        path = %path.display(),
                        error = %e,
                        "Skipping unreadable local candidate"
                    );
                    unreadable += 1;
                    continue;
                }
            };

            return match request.parse(raw) {
                Ok(data) => ResolutionOutcome::success(data, SourceTag::Local(path.clone())),
                Err(e) => ResolutionOutcome::soft_failure(format!(
                    "failed to parse {}: {}",
                    path.display(),
                    e
                )),
            };
        }

        let mut reason = format!(
            "{} not found in {} candidate location(s)",
            request.logical_filename,
            candidates.len()
        );
        if unreadable > 0 {
            reason.push_str(&format!(" ({} unreadable)", unreadable));
        }
        ResolutionOutcome::soft_failure(reason)
    }
}
