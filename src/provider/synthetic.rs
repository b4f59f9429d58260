//! Synthetic tier: returns the caller's fallback, if any.

use super::{ResolutionOutcome, SourceProvider};
use crate::registry::EntityDescriptor;
use crate::resolver::DataRequest;
use crate::types::{SourceTag, SYNTHETIC};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticProvider;

#[async_trait]
impl SourceProvider for SyntheticProvider {
    fn tier(&self) -> &'static str {
        SYNTHETIC
    }

    async fn attempt(
        &self,
        request: &DataRequest,
        _entity: &EntityDescriptor,
    ) -> ResolutionOutcome {
        match request.synthetic.as_ref().map(|fallback| fallback.produce()) {
            Some(value) if value.is_null() => {
                ResolutionOutcome::soft_failure("synthetic fallback produced null")
            }
            Some(value) => ResolutionOutcome::success(value, SourceTag::Synthetic),
            None => ResolutionOutcome::soft_failure("no synthetic fallback supplied"),
        }
    }
}
