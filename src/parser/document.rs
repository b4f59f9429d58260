//! Structured-document parsers (JSON, YAML) producing the nested value model.

use super::ContentParser;
use crate::error::ParseError;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDocumentParser;

impl ContentParser for JsonDocumentParser {
    fn parse(&self, raw: &str) -> Result<Value, ParseError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// YAML documents are deserialized straight into the JSON value model so every
/// structured format hands callers the same shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlDocumentParser;

impl ContentParser for YamlDocumentParser {
    fn parse(&self, raw: &str) -> Result<Value, ParseError> {
        Ok(serde_yaml::from_str(raw)?)
    }
}
