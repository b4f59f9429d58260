//! DataRequest: one logical file lookup, built per call.

use crate::error::ParseError;
use crate::parser::ContentParser;
use crate::synthetic::SyntheticFallback;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct DataRequest {
    pub entity_id: String,
    pub logical_filename: String,
    /// Applied by every tier right after raw content is obtained. `None`
    /// returns the raw text as a string value.
    pub parser: Option<Arc<dyn ContentParser>>,
    /// Last-resort value for the synthetic tier.
    pub synthetic: Option<SyntheticFallback>,
}

impl DataRequest {
    pub fn new(entity_id: &str, logical_filename: &str) -> Self {
        Self {
            entity_id: entity_id.to_string(),
            logical_filename: logical_filename.to_string(),
            parser: None,
            synthetic: None,
        }
    }

    pub fn with_parser(mut self, parser: Arc<dyn ContentParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    pub fn with_synthetic(mut self, fallback: impl Into<SyntheticFallback>) -> Self {
        self.synthetic = Some(fallback.into());
        self
    }

    /// Run the request's parser over raw content.
    ///
    /// A document that parses to `null` is rejected: a successful result
    /// always carries data.
    pub fn parse(&self, raw: String) -> Result<Value, ParseError> {
        let value = match &self.parser {
            Some(parser) => parser.parse(&raw)?,
            None => Value::String(raw),
        };
        if value.is_null() {
            return Err(ParseError::Custom("content parsed to null".to_string()));
        }
        Ok(value)
    }
}

impl std::fmt::Debug for DataRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataRequest")
            .field("entity_id", &self.entity_id)
            .field("logical_filename", &self.logical_filename)
            .field("parser", &self.parser.is_some())
            .field("synthetic", &self.synthetic)
            .finish()
    }
}
