//! Global config file source: $XDG_CONFIG_HOME/tiered-data/config.toml

use crate::config::xdg;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};

/// Add the global config file if it exists. A missing home directory simply
/// skips this layer.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = match xdg::global_config_path() {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!("Skipping global config layer: {}", e);
            return Ok(builder);
        }
    };

    Ok(builder.add_source(
        File::from(path)
            .format(FileFormat::Toml)
            .required(false),
    ))
}
