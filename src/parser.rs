//! Content Parsers
//!
//! Pure functions from raw text to a structured value. Parsers are selected by
//! content-type tag (the filename suffix) through a [`ParserRegistry`], so a
//! new format is added by registering a parser rather than editing a
//! dispatcher.

pub mod document;
pub mod registry;
pub mod table;

use crate::error::ParseError;
use serde_json::Value;

pub use document::{JsonDocumentParser, YamlDocumentParser};
pub use registry::{content_type_tag, ParserRegistry};
pub use table::DelimitedTableParser;

/// Strategy for turning raw content into a value.
pub trait ContentParser: Send + Sync {
    fn parse(&self, raw: &str) -> Result<Value, ParseError>;
}

impl<F> ContentParser for F
where
    F: Fn(&str) -> Result<Value, ParseError> + Send + Sync,
{
    fn parse(&self, raw: &str) -> Result<Value, ParseError> {
        self(raw)
    }
}

/// Returns plain text and markup unparsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughParser;

impl ContentParser for PassthroughParser {
    fn parse(&self, raw: &str) -> Result<Value, ParseError> {
        Ok(Value::String(raw.to_string()))
    }
}
