//! Source Providers
//!
//! Each tier implements [`SourceProvider::attempt`], which never errors: it
//! yields either parsed data with provenance or a soft failure carrying the
//! reason. Providers are stateless and shared across concurrent resolutions.

pub mod http;
pub mod local;
pub mod remote_api;
pub mod remote_raw;
pub mod synthetic;

use crate::registry::EntityDescriptor;
use crate::resolver::DataRequest;
use crate::types::{RemoteUrls, SourceTag};
use async_trait::async_trait;
use serde_json::Value;

pub use http::build_client;
pub use local::LocalStorageProvider;
pub use remote_api::RemoteApiProvider;
pub use remote_raw::RemoteRawProvider;
pub use synthetic::SyntheticProvider;

/// Where a successful value came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Provenance {
    pub source: SourceTag,
    pub urls: Option<RemoteUrls>,
}

/// Result of one tier's attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    Success { data: Value, provenance: Provenance },
    SoftFailure { reason: String },
}

impl ResolutionOutcome {
    pub fn success(data: Value, source: SourceTag) -> Self {
        ResolutionOutcome::Success {
            data,
            provenance: Provenance { source, urls: None },
        }
    }

    pub fn success_with_urls(data: Value, source: SourceTag, urls: RemoteUrls) -> Self {
        ResolutionOutcome::Success {
            data,
            provenance: Provenance {
                source,
                urls: Some(urls),
            },
        }
    }

    pub fn soft_failure(reason: impl Into<String>) -> Self {
        ResolutionOutcome::SoftFailure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResolutionOutcome::Success { .. })
    }
}

/// One tier of the fallback chain.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    /// Short label used in diagnostics ("local", "remote-raw", ...).
    fn tier(&self) -> &'static str;

    /// Try to satisfy the request for a known entity.
    async fn attempt(&self, request: &DataRequest, entity: &EntityDescriptor)
        -> ResolutionOutcome;
}
