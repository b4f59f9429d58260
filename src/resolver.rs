//! Resolver
//!
//! Walks the provider chain for one request, strictly one tier at a time and
//! in declared order. The first success wins; soft failures are collected and
//! reported together only when every tier, including an implicit synthetic
//! tier, has failed. `resolve` never returns an error: every expected failure
//! mode is expressed in the [`ResolutionResult`].

pub mod batch;
pub mod chain;
pub mod request;
pub mod result;

use crate::error::ApiError;
use crate::parser::ParserRegistry;
use crate::provider::{ResolutionOutcome, SourceProvider, SyntheticProvider};
use crate::registry::{EntityDescriptor, EntityRegistry};
use crate::synthetic::SyntheticFallback;
use futures::future::join_all;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub use batch::{BatchResolution, BatchSummary};
pub use chain::ProviderChain;
pub use request::DataRequest;
pub use result::{ResolutionResult, TierFailure};

/// Long-lived resolver shared across concurrent requests.
#[derive(Clone)]
pub struct Resolver {
    registry: Arc<dyn EntityRegistry>,
    chain: ProviderChain,
    parsers: ParserRegistry,
}

impl Resolver {
    pub fn new(registry: Arc<dyn EntityRegistry>, chain: ProviderChain) -> Self {
        Self {
            registry,
            chain,
            parsers: ParserRegistry::with_defaults(),
        }
    }

    pub fn with_parsers(mut self, parsers: ParserRegistry) -> Self {
        self.parsers = parsers;
        self
    }

    pub fn chain(&self) -> &ProviderChain {
        &self.chain
    }

    pub fn registry(&self) -> &dyn EntityRegistry {
        self.registry.as_ref()
    }

    /// Request for a file with the parser its suffix maps to.
    pub fn request(&self, entity_id: &str, logical_filename: &str) -> DataRequest {
        let request = DataRequest::new(entity_id, logical_filename);
        match self.parsers.parser_for(logical_filename) {
            Some(parser) => request.with_parser(parser),
            None => request,
        }
    }

    /// Resolve one request through the chain.
    pub async fn resolve(&self, request: &DataRequest) -> ResolutionResult {
        let Some(entity) = self.registry.lookup(&request.entity_id) else {
            debug!(entity = %request.entity_id, "Unknown entity; no tiers attempted");
            return ResolutionResult::not_found(&request.entity_id);
        };

        if !entity.declares(&request.logical_filename) {
            debug!(
                entity = %request.entity_id,
                file = %request.logical_filename,
                "File is not declared by entity"
            );
        }

        let mut failures = Vec::with_capacity(self.chain.len() + 1);
        for provider in self.chain.providers() {
            let attempt = Self::try_tier(provider.as_ref(), request, entity, &mut failures);
            if let Some(result) = attempt.await {
                return result;
            }
        }

        if request.synthetic.is_some() && !self.chain.has_synthetic() {
            let attempt = Self::try_tier(&SyntheticProvider, request, entity, &mut failures);
            if let Some(result) = attempt.await {
                return result;
            }
        }

        let result = ResolutionResult::exhausted(&failures);
        warn!(
            entity = %request.entity_id,
            file = %request.logical_filename,
            error = result.error().unwrap_or_default(),
            "All tiers failed"
        );
        result
    }

    async fn try_tier(
        provider: &dyn SourceProvider,
        request: &DataRequest,
        entity: &EntityDescriptor,
        failures: &mut Vec<TierFailure>,
    ) -> Option<ResolutionResult> {
        let tier = provider.tier();
        debug!(
            tier,
            entity = %request.entity_id,
            file = %request.logical_filename,
            "Attempting tier"
        );

        match provider.attempt(request, entity).await {
            ResolutionOutcome::Success { data, provenance } => {
                info!(
                    entity = %request.entity_id,
                    file = %request.logical_filename,
                    source = %provenance.source,
                    "Resolved"
                );
                Some(ResolutionResult::resolved(data, provenance))
            }
            ResolutionOutcome::SoftFailure { reason } => {
                debug!(tier, reason = %reason, "Tier failed; falling through");
                failures.push(TierFailure { tier, reason });
                None
            }
        }
    }

    /// Resolve every declared file of an entity concurrently. Each file gets
    /// its own request; one file failing has no effect on the others.
    pub async fn resolve_all(
        &self,
        entity_id: &str,
        fallbacks: &HashMap<String, SyntheticFallback>,
    ) -> Result<BatchResolution, ApiError> {
        let entity = self
            .registry
            .lookup(entity_id)
            .ok_or_else(|| ApiError::UnknownEntity(entity_id.to_string()))?;

        let requests: Vec<DataRequest> = entity
            .files
            .iter()
            .map(|file| {
                let request = self.request(entity_id, file);
                match fallbacks.get(file) {
                    Some(fallback) => request.with_synthetic(fallback.clone()),
                    None => request,
                }
            })
            .collect();

        let outcomes = join_all(requests.iter().map(|request| self.resolve(request))).await;

        let results: BTreeMap<String, ResolutionResult> = requests
            .into_iter()
            .map(|r| r.logical_filename)
            .zip(outcomes)
            .collect();

        let batch = BatchResolution::new(entity_id, results);
        info!(
            entity = entity_id,
            attempted = batch.summary.attempted,
            succeeded = batch.summary.succeeded,
            "Batch resolution finished"
        );
        Ok(batch)
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("chain", &self.chain)
            .field("parsers", &self.parsers)
            .finish()
    }
}
