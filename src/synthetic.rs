//! Synthetic Data
//!
//! Caller-supplied placeholder data for when no live source can answer. A
//! fallback is either a fixed value returned verbatim or a generator invoked
//! once per resolution. The bundled [`TabularGenerator`] is seeded, so the same
//! seed always produces the same rows.

pub mod tabular;

use serde_json::Value;
use std::sync::Arc;

pub use tabular::{Column, ColumnKind, TabularGenerator};

/// Produces a synthetic value on demand.
pub trait SyntheticGenerator: Send + Sync {
    fn generate(&self) -> Value;
}

impl<F> SyntheticGenerator for F
where
    F: Fn() -> Value + Send + Sync,
{
    fn generate(&self) -> Value {
        self()
    }
}

/// Placeholder data attached to a request.
#[derive(Clone)]
pub enum SyntheticFallback {
    Value(Value),
    Generator(Arc<dyn SyntheticGenerator>),
}

impl SyntheticFallback {
    pub fn value(value: Value) -> Self {
        SyntheticFallback::Value(value)
    }

    pub fn generator<G>(generator: G) -> Self
    where
        G: SyntheticGenerator + 'static,
    {
        SyntheticFallback::Generator(Arc::new(generator))
    }

    /// The value this fallback stands for.
    pub fn produce(&self) -> Value {
        match self {
            SyntheticFallback::Value(value) => value.clone(),
            SyntheticFallback::Generator(generator) => generator.generate(),
        }
    }
}

impl std::fmt::Debug for SyntheticFallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyntheticFallback::Value(value) => f.debug_tuple("Value").field(value).finish(),
            SyntheticFallback::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

impl From<Value> for SyntheticFallback {
    fn from(value: Value) -> Self {
        SyntheticFallback::Value(value)
    }
}
