//! ProviderChain: ordered, immutable list of tiers. Position is priority.

use crate::config::RemoteCoordinates;
use crate::error::ApiError;
use crate::provider::{
    LocalStorageProvider, RemoteApiProvider, RemoteRawProvider, SourceProvider, SyntheticProvider,
};
use crate::types::SYNTHETIC;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct ProviderChain {
    providers: Vec<Arc<dyn SourceProvider>>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Arc<dyn SourceProvider>>) -> Self {
        Self { providers }
    }

    /// local > remote-raw > remote-api > synthetic.
    pub fn standard(
        coordinates: &RemoteCoordinates,
        local_root: Option<PathBuf>,
        client: reqwest::Client,
    ) -> Result<Self, ApiError> {
        let local = match local_root {
            Some(root) => LocalStorageProvider::with_root(root),
            None => LocalStorageProvider::new(),
        };
        Ok(Self::new(vec![
            Arc::new(local),
            Arc::new(RemoteRawProvider::new(client.clone(), coordinates.clone())?),
            Arc::new(RemoteApiProvider::new(client, coordinates.clone())?),
            Arc::new(SyntheticProvider),
        ]))
    }

    pub fn providers(&self) -> &[Arc<dyn SourceProvider>] {
        &self.providers
    }

    pub fn tiers(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.tier()).collect()
    }

    /// Whether a synthetic tier is already part of the chain.
    pub fn has_synthetic(&self) -> bool {
        self.providers.iter().any(|p| p.tier() == SYNTHETIC)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderChain")
            .field("tiers", &self.tiers())
            .finish()
    }
}
