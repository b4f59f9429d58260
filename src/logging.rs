//! Logging System
//!
//! Structured logging with `tracing`. A [`LoggingConfig`] section (from the
//! config file, with CLI flags folded in) picks the level, format and
//! destination; `TIERED_DATA_LOG*` environment variables win over both.
//! Logs go to stderr unless told otherwise so stdout stays free for command
//! output.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const ENV_FILTER: &str = "TIERED_DATA_LOG";
const ENV_FORMAT: &str = "TIERED_DATA_LOG_FORMAT";
const ENV_OUTPUT: &str = "TIERED_DATA_LOG_OUTPUT";
const ENV_FILE: &str = "TIERED_DATA_LOG_FILE";
const ENV_MODULES: &str = "TIERED_DATA_LOG_MODULES";

const LOG_FILE_NAME: &str = "tiered-data.log";

/// Line format of emitted events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ApiError::ConfigError(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                other
            ))),
        }
    }
}

/// Where events are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogOutput {
    #[serde(rename = "stdout")]
    Stdout,
    #[default]
    #[serde(rename = "stderr")]
    Stderr,
    #[serde(rename = "both")]
    Both,
    #[serde(rename = "file")]
    File,
    #[serde(rename = "file+stderr")]
    FileAndStderr,
}

impl LogOutput {
    pub fn writes_file(self) -> bool {
        matches!(self, LogOutput::File | LogOutput::FileAndStderr)
    }
}

impl FromStr for LogOutput {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "stdout" => Ok(LogOutput::Stdout),
            "stderr" => Ok(LogOutput::Stderr),
            "both" => Ok(LogOutput::Both),
            "file" => Ok(LogOutput::File),
            "file+stderr" => Ok(LogOutput::FileAndStderr),
            other => Err(ApiError::ConfigError(format!(
                "Invalid log output: {} (expected stdout, stderr, both, file or file+stderr)",
                other
            ))),
        }
    }
}

/// `[logging]` section of the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `false` installs a subscriber that drops everything
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,

    /// Base level directive: trace, debug, info, warn, error, off
    #[serde(default = "info_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    #[serde(default)]
    pub output: LogOutput,

    /// Log file for the file outputs; platform state dir when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// ANSI colors for text output on a terminal stream
    #[serde(default = "enabled_by_default")]
    pub color: bool,

    /// Per-target levels, e.g. `tiered_data::provider = "debug"`
    #[serde(default)]
    pub modules: BTreeMap<String, String>,
}

fn enabled_by_default() -> bool {
    true
}

fn info_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: info_level(),
            format: LogFormat::default(),
            output: LogOutput::default(),
            file: None,
            color: true,
            modules: BTreeMap::new(),
        }
    }
}

/// Log file location: `TIERED_DATA_LOG_FILE`, then the configured path, then
/// `tiered-data.log` in the platform state (or local data) directory.
pub fn log_file_path(configured: Option<&Path>) -> Result<PathBuf, ApiError> {
    if let Some(path) = env_value(ENV_FILE) {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = configured.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(path.to_path_buf());
    }
    let dirs = directories::ProjectDirs::from("", "", "tiered-data").ok_or_else(|| {
        ApiError::ConfigError("Could not determine a directory for the log file".to_string())
    })?;
    let dir = dirs.state_dir().unwrap_or_else(|| dirs.data_local_dir());
    Ok(dir.join(LOG_FILE_NAME))
}

/// Install the global subscriber.
///
/// Environment variables override the config, which already carries any CLI
/// flags. Returns an error if a subscriber is already installed.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), ApiError> {
    let defaults = LoggingConfig::default();
    let config = config.unwrap_or(&defaults);

    if !config.enabled {
        return Registry::default()
            .with(EnvFilter::new("off"))
            .try_init()
            .map_err(install_error);
    }

    let filter = env_filter(config)?;
    let format = match env_value(ENV_FORMAT) {
        Some(raw) => raw.parse()?,
        None => config.format,
    };
    let output = match env_value(ENV_OUTPUT) {
        Some(raw) => raw.parse()?,
        None => config.output,
    };
    let writer = make_writer(output, config.file.as_deref())?;
    let ansi = config.color && !output.writes_file();

    let subscriber = Registry::default().with(filter);
    let installed = match format {
        LogFormat::Json => subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init(),
        LogFormat::Text => subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(ansi)
                    .with_writer(writer),
            )
            .try_init(),
    };
    installed.map_err(install_error)
}

fn install_error(e: impl std::fmt::Display) -> ApiError {
    ApiError::ConfigError(format!("Failed to install logger: {}", e))
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn make_writer(output: LogOutput, configured_file: Option<&Path>) -> Result<BoxMakeWriter, ApiError> {
    let writer = match output {
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogOutput::Both => BoxMakeWriter::new(std::io::stdout.and(std::io::stderr)),
        LogOutput::File => BoxMakeWriter::new(Mutex::new(open_log_file(configured_file)?)),
        LogOutput::FileAndStderr => BoxMakeWriter::new(
            Mutex::new(open_log_file(configured_file)?).and(std::io::stderr),
        ),
    };
    Ok(writer)
}

fn open_log_file(configured: Option<&Path>) -> Result<std::fs::File, ApiError> {
    let path = log_file_path(configured)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?)
}

/// `TIERED_DATA_LOG` replaces everything; otherwise the base level plus
/// per-module directives from config and `TIERED_DATA_LOG_MODULES`.
fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, ApiError> {
    if let Ok(filter) = EnvFilter::try_from_env(ENV_FILTER) {
        return Ok(filter);
    }
    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let from_env = env_value(ENV_MODULES).unwrap_or_default();
    let env_directives = from_env.split(',').filter_map(|pair| {
        pair.split_once('=')
            .map(|(target, level)| (target.trim().to_string(), level.trim().to_string()))
    });
    let configured = config
        .modules
        .iter()
        .map(|(target, level)| (target.clone(), level.clone()));

    configured
        .chain(env_directives)
        .try_fold(EnvFilter::new(&config.level), |filter, (target, level)| {
            let directive = format!("{}={}", target, level);
            let parsed = directive.parse().map_err(|e| {
                ApiError::ConfigError(format!("Invalid log directive '{}': {}", directive, e))
            })?;
            Ok(filter.add_directive(parsed))
        })
}
