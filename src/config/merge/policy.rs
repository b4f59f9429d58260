//! Merge policy: built-in defaults every layered load starts from.

use crate::config::remote::{DEFAULT_API_BASE_URL, DEFAULT_RAW_BASE_URL};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with defaults. Later sources override key by key; tables
/// such as `entities` merge rather than replace.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("remote.branch", "main")?
        .set_default("remote.raw_base_url", DEFAULT_RAW_BASE_URL)?
        .set_default("remote.api_base_url", DEFAULT_API_BASE_URL)?
        .set_default("logging.level", "info")?
        .set_default("logging.output", "stderr")
}
