//! Core types shared by providers, the resolver, and the CLI.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

/// Source tag for the remote raw tier.
pub const REMOTE_RAW: &str = "remote-raw";
/// Source tag for the remote structured-API tier.
pub const REMOTE_API: &str = "remote-api";
/// Source tag for the synthetic tier.
pub const SYNTHETIC: &str = "synthetic";
/// Source tag for an unknown entity.
pub const NOT_FOUND: &str = "not-found";
/// Source tag for an exhausted chain.
pub const ERROR: &str = "error";

/// Which tier satisfied a request, or why none did.
///
/// The string form is part of the external contract: a local result renders
/// as the winning path itself, every other variant as its fixed tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceTag {
    Local(PathBuf),
    RemoteRaw,
    RemoteApi,
    Synthetic,
    NotFound,
    Error,
}

impl SourceTag {
    pub fn is_local(&self) -> bool {
        matches!(self, SourceTag::Local(_))
    }

    /// Short tier label used in logs and diagnostics (never a path).
    pub fn tier_label(&self) -> &'static str {
        match self {
            SourceTag::Local(_) => "local",
            SourceTag::RemoteRaw => REMOTE_RAW,
            SourceTag::RemoteApi => REMOTE_API,
            SourceTag::Synthetic => SYNTHETIC,
            SourceTag::NotFound => NOT_FOUND,
            SourceTag::Error => ERROR,
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceTag::Local(path) => write!(f, "{}", path.display()),
            other => f.write_str(other.tier_label()),
        }
    }
}

impl Serialize for SourceTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// URLs a client can use to fetch the same file directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteUrls {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}
