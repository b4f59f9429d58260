//! Content-type tag → parser mapping.

use super::{
    ContentParser, DelimitedTableParser, JsonDocumentParser, PassthroughParser, YamlDocumentParser,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Derive the content-type tag from a filename: the lowercase suffix after
/// the last `.`, or `None` when there is no suffix.
pub fn content_type_tag(filename: &str) -> Option<String> {
    let name = filename.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(filename);
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext.to_ascii_lowercase()),
        _ => None,
    }
}

/// Registry of parsers keyed by content-type tag.
///
/// Built once at startup and shared; lookups hand out `Arc` clones so a
/// request can own its parser without borrowing the registry.
#[derive(Clone, Default)]
pub struct ParserRegistry {
    parsers: HashMap<String, Arc<dyn ContentParser>>,
}

impl ParserRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Registry with the built-in table, document and passthrough formats.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("csv", DelimitedTableParser::csv());
        registry.register("tsv", DelimitedTableParser::tsv());
        registry.register("json", JsonDocumentParser);
        registry.register("yaml", YamlDocumentParser);
        registry.register("yml", YamlDocumentParser);
        for tag in ["txt", "md", "markdown", "html", "htm"] {
            registry.register(tag, PassthroughParser);
        }
        registry
    }

    /// Register (or replace) the parser for a content-type tag.
    pub fn register<P>(&mut self, tag: &str, parser: P)
    where
        P: ContentParser + 'static,
    {
        self.parsers
            .insert(tag.to_ascii_lowercase(), Arc::new(parser));
    }

    pub fn get(&self, tag: &str) -> Option<Arc<dyn ContentParser>> {
        self.parsers.get(&tag.to_ascii_lowercase()).cloned()
    }

    /// Parser for a filename, chosen by its suffix. `None` means the content
    /// is returned raw.
    pub fn parser_for(&self, filename: &str) -> Option<Arc<dyn ContentParser>> {
        content_type_tag(filename).and_then(|tag| self.get(&tag))
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.parsers.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}
