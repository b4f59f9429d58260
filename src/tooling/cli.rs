//! CLI Tooling
//!
//! Command-line interface over the resolver. Every command is read-only:
//! resolving never writes to any tier.

use crate::config::{ConfigLoader, DataConfig};
use crate::error::ApiError;
use crate::logging::{LogFormat, LogOutput, LoggingConfig};
use crate::provider::build_client;
use crate::registry::{
    validate_entity_config, EntityRegistry, StaticEntityRegistry, ValidationResult,
};
use crate::resolver::{ProviderChain, Resolver};
use crate::synthetic::{SyntheticFallback, TabularGenerator};
use crate::tooling::format::{
    format_batch_text, format_entities_text, format_resolution_text, format_validation_text,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Tiered Data CLI - resolve entity data files across local, remote and synthetic sources
#[derive(Parser)]
#[command(name = "tiered-data")]
#[command(about = "Resolve entity data files through local, remote and synthetic tiers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<LogFormat>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<LogOutput>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold logging flags over the configured logging section.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.format = format;
        }
        if let Some(output) = self.log_output {
            config.output = output;
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve one logical file of an entity
    Resolve {
        /// Entity id
        entity: String,
        /// Logical filename, e.g. invoices.csv
        file: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Fixed synthetic fallback value as JSON
        #[arg(long, conflicts_with = "synthetic_rows")]
        fallback: Option<String>,
        /// Generate this many synthetic rows when no live tier answers
        #[arg(long)]
        synthetic_rows: Option<usize>,
        /// Shape of generated rows
        #[arg(long, value_enum, default_value = "generic")]
        preset: SyntheticPreset,
        /// Seed for generated rows
        #[arg(long, default_value = "0")]
        seed: u64,
    },
    /// Resolve every declared file of an entity
    Batch {
        /// Entity id
        entity: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List registered entities
    Entities {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Check remote coordinates and the entity table
    Validate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SyntheticPreset {
    Generic,
    Invoices,
}

/// Rendered command output. `success` is false when the command completed
/// but the thing it checked did not hold (unresolved file, invalid config).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub success: bool,
}

impl CommandOutput {
    fn new(text: String, success: bool) -> Self {
        Self { text, success }
    }
}

/// CLI context holding the loaded configuration and a ready resolver.
pub struct CliContext {
    config: DataConfig,
    registry: Arc<StaticEntityRegistry>,
    resolver: Resolver,
    workspace_root: PathBuf,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Self::from_config(workspace_root, config)
    }

    /// Build the registry, chain, and resolver from an already loaded config.
    pub fn from_config(workspace_root: PathBuf, config: DataConfig) -> Result<Self, ApiError> {
        let registry = Arc::new(StaticEntityRegistry::from_config(&config)?);
        let local_root = config.local.resolve_root(&workspace_root);
        let chain = ProviderChain::standard(&config.remote, Some(local_root), build_client()?)?;
        let resolver = Resolver::new(registry.clone(), chain);

        Ok(Self {
            config,
            registry,
            resolver,
            workspace_root,
        })
    }

    pub fn config(&self) -> &DataConfig {
        &self.config
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Execute a CLI command
    pub async fn execute(&self, command: &Commands) -> Result<CommandOutput, ApiError> {
        match command {
            Commands::Resolve {
                entity,
                file,
                format,
                fallback,
                synthetic_rows,
                preset,
                seed,
            } => {
                let fallback =
                    parse_fallback(fallback.as_deref(), *synthetic_rows, *preset, *seed)?;
                self.handle_resolve(entity, file, format, fallback).await
            }
            Commands::Batch { entity, format } => self.handle_batch(entity, format).await,
            Commands::Entities { format } => self.handle_entities(format),
            Commands::Validate => Ok(self.handle_validate()),
        }
    }

    async fn handle_resolve(
        &self,
        entity_id: &str,
        filename: &str,
        format: &str,
        fallback: Option<SyntheticFallback>,
    ) -> Result<CommandOutput, ApiError> {
        check_format(format)?;
        let mut request = self.resolver.request(entity_id, filename);
        if let Some(fallback) = fallback {
            request = request.with_synthetic(fallback);
        }

        let result = self.resolver.resolve(&request).await;
        info!(
            entity = entity_id,
            file = filename,
            source = %result.source(),
            success = result.is_success(),
            "resolve command finished"
        );

        let text = if format == "json" {
            serde_json::to_string_pretty(&result)?
        } else {
            format_resolution_text(entity_id, filename, &result)
        };
        Ok(CommandOutput::new(text, result.is_success()))
    }

    async fn handle_batch(&self, entity_id: &str, format: &str) -> Result<CommandOutput, ApiError> {
        check_format(format)?;
        let batch = self.resolver.resolve_all(entity_id, &HashMap::new()).await?;
        let success = batch.summary.failed() == 0;
        let text = if format == "json" {
            serde_json::to_string_pretty(&batch)?
        } else {
            format_batch_text(&batch)
        };
        Ok(CommandOutput::new(text, success))
    }

    fn handle_entities(&self, format: &str) -> Result<CommandOutput, ApiError> {
        check_format(format)?;
        let entities = self.registry.entities();
        let text = if format == "json" {
            serde_json::to_string_pretty(&entities)?
        } else {
            format_entities_text(&entities)
        };
        Ok(CommandOutput::new(text, true))
    }

    fn handle_validate(&self) -> CommandOutput {
        let results = self.validation_results();
        let success = results.iter().all(ValidationResult::is_valid);
        CommandOutput::new(format_validation_text(&results), success)
    }

    /// Remote coordinates first, then one result per entity.
    pub fn validation_results(&self) -> Vec<ValidationResult> {
        let remote = &self.config.remote;
        let subject = if remote.is_configured() {
            format!(
                "remote ({}/{}@{})",
                remote.owner, remote.repository, remote.branch
            )
        } else {
            "remote (not configured)".to_string()
        };
        let mut remote_result = ValidationResult::new(subject);
        match remote.validate() {
            Ok(()) => remote_result.add_check("Coordinates valid", true),
            Err(e) => {
                remote_result.add_check("Coordinates valid", false);
                remote_result.add_error(e);
            }
        }
        let mut results = vec![remote_result];

        if self.config.entities.is_empty() {
            let mut empty = ValidationResult::new("entities".to_string());
            empty.add_check("At least one entity registered", false);
            results.push(empty);
        }

        let local_root = self.config.local.resolve_root(&self.workspace_root);
        for (entity_id, entity_config) in &self.config.entities {
            let mut result = ValidationResult::new(format!("entity '{}'", entity_id));
            match validate_entity_config(entity_id, entity_config) {
                Ok(()) => result.add_check("Configuration valid", true),
                Err(e) => {
                    result.add_check("Configuration valid", false);
                    result.add_error(e);
                }
            }

            let local_present = self
                .registry
                .lookup(entity_id)
                .map(|entity| {
                    entity.local_candidates.iter().any(|candidate| {
                        let dir = if candidate.is_absolute() {
                            candidate.clone()
                        } else {
                            local_root.join(candidate)
                        };
                        dir.is_dir()
                    })
                })
                .unwrap_or(false);
            result.add_check(
                "Reachable by a live tier (local directory or remote)",
                local_present || remote.is_configured(),
            );
            results.push(result);
        }

        results
    }
}

fn check_format(format: &str) -> Result<(), ApiError> {
    match format {
        "text" | "json" => Ok(()),
        other => Err(ApiError::InvalidRequest(format!(
            "Invalid format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

/// Build the synthetic fallback from `--fallback` or `--synthetic-rows`.
pub fn parse_fallback(
    fallback: Option<&str>,
    synthetic_rows: Option<usize>,
    preset: SyntheticPreset,
    seed: u64,
) -> Result<Option<SyntheticFallback>, ApiError> {
    if let Some(raw) = fallback {
        let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| {
            ApiError::InvalidRequest(format!("Fallback is not valid JSON: {}", e))
        })?;
        if value.is_null() {
            return Err(ApiError::InvalidRequest(
                "Fallback must not be null".to_string(),
            ));
        }
        return Ok(Some(SyntheticFallback::value(value)));
    }

    Ok(synthetic_rows.map(|rows| {
        let generator = match preset {
            SyntheticPreset::Generic => TabularGenerator::generic(rows, seed),
            SyntheticPreset::Invoices => TabularGenerator::invoices(rows, seed),
        };
        SyntheticFallback::generator(generator)
    }))
}
