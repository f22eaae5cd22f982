//! Layers CLI flags over the shared config crate.
//!
//! Core never sees these types -- it receives a pre-built `ConsoleConfig`.

use clap::ValueEnum;

use movesys_config::Config;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Apply `--api-url`, `--fallback-url` and `--timeout` on top of the
/// loaded configuration.
pub fn apply_overrides(mut cfg: Config, global: &GlobalOpts) -> Config {
    if let Some(ref url) = global.api_url {
        cfg.api_url.clone_from(url);
    }
    if let Some(ref url) = global.fallback_url {
        cfg.fallback_url = Some(url.clone());
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
    cfg
}

/// `--output` wins, then the configured default.
pub fn output_format(global: &GlobalOpts, cfg: &Config) -> Result<OutputFormat, CliError> {
    if let Some(format) = global.output {
        return Ok(format);
    }
    OutputFormat::from_str(&cfg.output, true).map_err(|_| CliError::Validation {
        field: "output".into(),
        reason: format!("expected table, json or plain, got '{}'", cfg.output),
    })
}
