//! Validator settings: config file first, then command-line overrides.

use std::fs;
use std::path::Path;

use anyhow::Context;
use sqlcheck_core::ValidatorConfig;
use tracing::debug;

use crate::cli::{Cli, OutputFormat};

/// Settings the command line can express but the validator cannot use.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A depth cap of zero rejects every input.
    #[error("max depth must be at least 1")]
    ZeroMaxDepth,

    /// An input limit of zero rejects every input.
    #[error("max input bytes must be at least 1")]
    ZeroInputLimit,

    /// `--tokens` only makes sense for text output.
    #[error("--tokens cannot be combined with --format json")]
    TokensInJson,
}

/// Reads a JSON config file. Missing fields keep their defaults.
///
/// # Errors
///
/// Fails when the file cannot be read or is not a valid config.
pub fn load_file(path: &Path) -> anyhow::Result<ValidatorConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("invalid config file {}", path.display()))
}

/// Builds the validator configuration for `cli`.
///
/// # Errors
///
/// Fails when the config file cannot be loaded or the resulting settings are
/// unusable.
pub fn resolve(cli: &Cli) -> anyhow::Result<ValidatorConfig> {
    let mut config = match &cli.config {
        Some(path) => load_file(path)?,
        None => ValidatorConfig::default(),
    };

    if let Some(max_depth) = cli.max_depth {
        config.max_depth = max_depth;
    }
    if let Some(policy) = cli.policy {
        config.policy = policy.into();
    }
    if let Some(limit) = cli.max_input_bytes {
        config.max_input_bytes = Some(limit);
    }
    debug!(?config, "validator configuration");

    check(cli, &config)?;
    Ok(config)
}

fn check(cli: &Cli, config: &ValidatorConfig) -> Result<(), CliError> {
    if config.max_depth == 0 {
        return Err(CliError::ZeroMaxDepth);
    }
    if config.max_input_bytes == Some(0) {
        return Err(CliError::ZeroInputLimit);
    }
    if cli.tokens && cli.format == OutputFormat::Json {
        return Err(CliError::TokensInJson);
    }
    Ok(())
}

/// Describes where a config came from, for log lines.
#[must_use]
pub fn origin(cli: &Cli) -> String {
    cli.config
        .as_ref()
        .map_or_else(|| "defaults".to_string(), |path| path.display().to_string())
}
