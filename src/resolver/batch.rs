//! Batch results: every declared file of one entity, resolved independently.

use super::ResolutionResult;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub attempted: usize,
    pub succeeded: usize,
}

impl BatchSummary {
    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchResolution {
    pub entity_id: String,
    pub results: BTreeMap<String, ResolutionResult>,
    pub summary: BatchSummary,
}

impl BatchResolution {
    pub fn new(entity_id: &str, results: BTreeMap<String, ResolutionResult>) -> Self {
        let summary = BatchSummary {
            attempted: results.len(),
            succeeded: results.values().filter(|r| r.is_success()).count(),
        };
        Self {
            entity_id: entity_id.to_string(),
            results,
            summary,
        }
    }

    pub fn get(&self, filename: &str) -> Option<&ResolutionResult> {
        self.results.get(filename)
    }
}
