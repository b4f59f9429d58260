//! Entity Registry
//!
//! Read-only collaborator answering "is this entity known, which files does it
//! declare, and where might they live". The resolver only ever reads from it.

pub mod entity;
pub mod validation;

use crate::config::DataConfig;
use crate::error::ApiError;
use std::collections::BTreeMap;

pub use entity::{default_local_candidates, EntityDescriptor};
pub use validation::{validate_entity_config, ValidationResult};

/// Lookup port consumed by the resolver.
pub trait EntityRegistry: Send + Sync {
    fn lookup(&self, entity_id: &str) -> Option<&EntityDescriptor>;

    /// All entities, ordered by id.
    fn entities(&self) -> Vec<&EntityDescriptor>;

    fn contains(&self, entity_id: &str) -> bool {
        self.lookup(entity_id).is_some()
    }
}

/// In-memory registry built at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticEntityRegistry {
    entities: BTreeMap<String, EntityDescriptor>,
}

impl StaticEntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
        }
    }

    /// Register an entity, replacing any previous descriptor with the same id
    pub fn register(&mut self, entity: EntityDescriptor) {
        self.entities.insert(entity.entity_id.clone(), entity);
    }

    /// Builder-style register
    pub fn with(mut self, entity: EntityDescriptor) -> Self {
        self.register(entity);
        self
    }

    /// Get an entity by ID or return an error
    pub fn get_or_error(&self, entity_id: &str) -> Result<&EntityDescriptor, ApiError> {
        self.entities
            .get(entity_id)
            .ok_or_else(|| ApiError::UnknownEntity(entity_id.to_string()))
    }

    /// Load entities from configuration. Invalid entries are rejected as a
    /// whole; a half-loaded registry is worse than none.
    pub fn load_from_config(&mut self, config: &DataConfig) -> Result<(), ApiError> {
        for (entity_id, entity_config) in &config.entities {
            validate_entity_config(entity_id, entity_config).map_err(ApiError::ConfigError)?;
            self.register(EntityDescriptor::from_config(entity_id, entity_config));
        }
        tracing::debug!(count = self.entities.len(), "Loaded entity registry");
        Ok(())
    }

    pub fn from_config(config: &DataConfig) -> Result<Self, ApiError> {
        let mut registry = Self::new();
        registry.load_from_config(config)?;
        Ok(registry)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl EntityRegistry for StaticEntityRegistry {
    fn lookup(&self, entity_id: &str) -> Option<&EntityDescriptor> {
        self.entities.get(entity_id)
    }

    fn entities(&self) -> Vec<&EntityDescriptor> {
        self.entities.values().collect()
    }
}
