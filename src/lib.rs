//! Tiered Data: Multi-Source Data Resolution
//!
//! Resolves an entity's logical data file through an ordered chain of
//! sources (local storage, raw remote files, the remote contents API and
//! caller-supplied synthetic data) and reports which tier answered.

pub mod config;
pub mod error;
pub mod logging;
pub mod parser;
pub mod provider;
pub mod registry;
pub mod resolver;
pub mod synthetic;
pub mod tooling;
pub mod types;

pub use error::{ApiError, ParseError};
pub use registry::{EntityDescriptor, EntityRegistry, StaticEntityRegistry};
pub use resolver::{DataRequest, ProviderChain, ResolutionResult, Resolver};
pub use synthetic::SyntheticFallback;
pub use types::SourceTag;
