//! Shared fixtures: instrumented providers, temp workspaces, mock remotes.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tiered_data::config::RemoteCoordinates;
use tiered_data::provider::{
    LocalStorageProvider, RemoteApiProvider, RemoteRawProvider, ResolutionOutcome, SourceProvider,
};
use tiered_data::registry::{EntityDescriptor, StaticEntityRegistry};
use tiered_data::resolver::{DataRequest, ProviderChain, Resolver};
use wiremock::MockServer;

pub const OWNER: &str = "acme";
pub const REPOSITORY: &str = "agent-samples";
pub const BRANCH: &str = "main";
pub const BASE_PATH: &str = "agents";

/// Wraps a provider and counts how often the chain reached it.
pub struct CountingProvider {
    inner: Arc<dyn SourceProvider>,
    calls: Arc<AtomicUsize>,
}

impl CountingProvider {
    pub fn wrap<P: SourceProvider + 'static>(inner: P) -> (Arc<dyn SourceProvider>, Counter) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider: Arc<dyn SourceProvider> = Arc::new(Self {
            inner: Arc::new(inner),
            calls: calls.clone(),
        });
        (provider, Counter(calls))
    }
}

#[async_trait]
impl SourceProvider for CountingProvider {
    fn tier(&self) -> &'static str {
        self.inner.tier()
    }

    async fn attempt(
        &self,
        request: &DataRequest,
        entity: &EntityDescriptor,
    ) -> ResolutionOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.attempt(request, entity).await
    }
}

#[derive(Clone)]
pub struct Counter(Arc<AtomicUsize>);

impl Counter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Provider that always answers with the same outcome.
pub struct ScriptedProvider {
    pub tier: &'static str,
    pub outcome: ResolutionOutcome,
}

#[async_trait]
impl SourceProvider for ScriptedProvider {
    fn tier(&self) -> &'static str {
        self.tier
    }

    async fn attempt(
        &self,
        _request: &DataRequest,
        _entity: &EntityDescriptor,
    ) -> ResolutionOutcome {
        self.outcome.clone()
    }
}

/// Coordinates pointing both remote tiers at a mock server.
pub fn coordinates_for(server: &MockServer) -> RemoteCoordinates {
    RemoteCoordinates {
        raw_base_url: server.uri(),
        api_base_url: server.uri(),
        ..RemoteCoordinates::new(OWNER, REPOSITORY, BRANCH, BASE_PATH)
    }
}

/// Request path the raw tier uses for an entity file.
pub fn raw_path(entity_id: &str, filename: &str) -> String {
    format!(
        "/{}/{}/{}/{}/{}/{}",
        OWNER, REPOSITORY, BRANCH, BASE_PATH, entity_id, filename
    )
}

/// Request path the API tier uses for an entity file.
pub fn api_path(entity_id: &str, filename: &str) -> String {
    format!(
        "/repos/{}/{}/contents/{}/{}/{}",
        OWNER, REPOSITORY, BASE_PATH, entity_id, filename
    )
}

/// Entity whose only local candidates live under `root`.
pub fn entity_in(root: &Path, entity_id: &str, files: &[&str]) -> EntityDescriptor {
    EntityDescriptor::new(entity_id, files).with_local_candidates(vec![
        root.join("data").join(entity_id),
        root.join("agents").join(entity_id).join("data"),
    ])
}

/// Write a file into the entity's primary local candidate directory.
pub fn write_local(root: &Path, entity_id: &str, filename: &str, contents: &str) -> PathBuf {
    let dir = root.join("data").join(entity_id);
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(filename);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Counters for each live tier of an instrumented chain.
pub struct ChainCounters {
    pub local: Counter,
    pub raw: Counter,
    pub api: Counter,
}

/// local > remote-raw > remote-api, every tier counted. No synthetic tier:
/// the resolver appends one when a request carries a fallback.
pub fn counted_chain(coordinates: RemoteCoordinates) -> (ProviderChain, ChainCounters) {
    let client = reqwest::Client::new();
    let (local, local_calls) = CountingProvider::wrap(LocalStorageProvider::new());
    let raw_provider = RemoteRawProvider::new(client.clone(), coordinates.clone()).unwrap();
    let (raw, raw_calls) = CountingProvider::wrap(raw_provider);
    let (api, api_calls) = CountingProvider::wrap(
        RemoteApiProvider::new(client, coordinates)
            .unwrap()
            .without_token(),
    );
    (
        ProviderChain::new(vec![local, raw, api]),
        ChainCounters {
            local: local_calls,
            raw: raw_calls,
            api: api_calls,
        },
    )
}

pub fn resolver_with(entities: Vec<EntityDescriptor>, chain: ProviderChain) -> Resolver {
    let registry = entities
        .into_iter()
        .fold(StaticEntityRegistry::new(), |registry, entity| {
            registry.with(entity)
        });
    Resolver::new(Arc::new(registry), chain)
}
