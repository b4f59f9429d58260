//! ResolutionResult: the envelope every resolution returns.

use crate::provider::Provenance;
use crate::types::{RemoteUrls, SourceTag};
use serde::Serialize;
use serde_json::Value;

/// One tier's failure reason, kept for the exhausted-chain diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierFailure {
    pub tier: &'static str,
    pub reason: String,
}

/// Outcome of a resolution. `data` is present exactly when `success` is true;
/// the constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionResult {
    success: bool,
    data: Option<Value>,
    source: SourceTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    provenance: Option<RemoteUrls>,
}

impl ResolutionResult {
    pub fn resolved(data: Value, provenance: Provenance) -> Self {
        Self {
            success: true,
            data: Some(data),
            source: provenance.source,
            error: None,
            provenance: provenance.urls,
        }
    }

    pub fn not_found(entity_id: &str) -> Self {
        Self {
            success: false,
            data: None,
            source: SourceTag::NotFound,
            error: Some(format!("Unknown entity: {}", entity_id)),
            provenance: None,
        }
    }

    /// Every tier failed. The error lists each tier's reason in chain order.
    pub fn exhausted(failures: &[TierFailure]) -> Self {
        let error = if failures.is_empty() {
            "no providers configured".to_string()
        } else {
            failures
                .iter()
                .map(|f| format!("{}: {}", f.tier, f.reason))
                .collect::<Vec<_>>()
                .join("; ")
        };
        Self {
            success: false,
            data: None,
            source: SourceTag::Error,
            error: Some(error),
            provenance: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<Value> {
        self.data
    }

    pub fn source(&self) -> &SourceTag {
        &self.source
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn provenance(&self) -> Option<&RemoteUrls> {
        self.provenance.as_ref()
    }

    /// Status a route handler maps this result to.
    pub fn http_status(&self) -> u16 {
        match (self.success, &self.source) {
            (true, _) => 200,
            (false, SourceTag::NotFound) => 404,
            (false, _) => 500,
        }
    }
}
