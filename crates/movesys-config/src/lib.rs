//! Shared configuration for MoveSys console tools.
//!
//! A flat TOML file plus `MOVESYS_*` environment variables, translated
//! into `movesys_core::ConsoleConfig`. The CLI layers its own flags on
//! top of the loaded [`Config`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use movesys_core::{ConsoleConfig, EndpointPaths, TransportConfig};

/// Prefix for every environment override (`MOVESYS_API_URL`, ...).
pub const ENV_PREFIX: &str = "MOVESYS_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// On-disk and environment configuration. Every key maps one-to-one to
/// a `MOVESYS_<KEY>` environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Primary API base URL, with or without an `/api/vN` suffix.
    pub api_url: String,

    /// Alternate host tried first when the primary is unreachable.
    pub fallback_url: Option<String>,

    /// Conventional hosts tried after `fallback_url`.
    pub local_fallbacks: Vec<String>,

    /// Request timeout in seconds.
    pub timeout: u64,

    /// Login entry point used after the session is evicted.
    pub login_path: String,

    /// Default output format for the CLI: table, json or plain.
    pub output: String,

    pub users_endpoint_path: String,
    pub deliveries_endpoint_path: String,
    pub vehicles_endpoint_path: String,
    pub fuel_entries_endpoint_path: String,
    pub maintenance_endpoint_path: String,
    pub reports_endpoint_path: String,
    pub dashboard_endpoint_path: String,
}

impl Default for Config {
    fn default() -> Self {
        let transport = TransportConfig::default();
        let paths = EndpointPaths::default();
        Self {
            api_url: transport.base_url,
            fallback_url: None,
            local_fallbacks: transport.local_fallbacks,
            timeout: transport.timeout.as_secs(),
            login_path: transport.login_path,
            output: "table".into(),
            users_endpoint_path: paths.users,
            deliveries_endpoint_path: paths.deliveries,
            vehicles_endpoint_path: paths.vehicles,
            fuel_entries_endpoint_path: paths.fuel_entries,
            maintenance_endpoint_path: paths.maintenance,
            reports_endpoint_path: paths.reports,
            dashboard_endpoint_path: paths.dashboard,
        }
    }
}

impl Config {
    /// Validate and translate into the core's connection settings.
    pub fn to_console_config(&self) -> Result<ConsoleConfig, ConfigError> {
        validate_url("api_url", &self.api_url)?;
        let fallback_url = self
            .fallback_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty());
        if let Some(url) = fallback_url {
            validate_url("fallback_url", url)?;
        }
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        let mut transport = TransportConfig::new(self.api_url.trim())
            .with_local_fallbacks(self.local_fallbacks.iter().map(String::as_str))
            .with_timeout(Duration::from_secs(self.timeout));
        if let Some(url) = fallback_url {
            transport = transport.with_fallback(url);
        }
        self.login_path.trim().clone_into(&mut transport.login_path);

        let paths = EndpointPaths {
            users: endpoint_path("users_endpoint_path", &self.users_endpoint_path)?,
            deliveries: endpoint_path("deliveries_endpoint_path", &self.deliveries_endpoint_path)?,
            vehicles: endpoint_path("vehicles_endpoint_path", &self.vehicles_endpoint_path)?,
            fuel_entries: endpoint_path(
                "fuel_entries_endpoint_path",
                &self.fuel_entries_endpoint_path,
            )?,
            maintenance: endpoint_path(
                "maintenance_endpoint_path",
                &self.maintenance_endpoint_path,
            )?,
            reports: endpoint_path("reports_endpoint_path", &self.reports_endpoint_path)?,
            dashboard: endpoint_path("dashboard_endpoint_path", &self.dashboard_endpoint_path)?,
        };

        Ok(ConsoleConfig::new(transport).with_paths(paths))
    }
}

fn validate_url(field: &str, raw: &str) -> Result<(), ConfigError> {
    let url: url::Url = raw.trim().parse().map_err(|_| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: field.into(),
            reason: format!("expected an http(s) URL, got '{raw}'"),
        });
    }
    Ok(())
}

/// Collection paths are joined onto the base URL, so they must be rooted.
fn endpoint_path(field: &str, raw: &str) -> Result<String, ConfigError> {
    let path = raw.trim();
    if path.is_empty() {
        return Err(ConfigError::Validation {
            field: field.into(),
            reason: "must not be empty".into(),
        });
    }
    if path.starts_with('/') {
        Ok(path.to_owned())
    } else {
        Ok(format!("/{path}"))
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "movesys", "movesys").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("movesys");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Defaults, then the TOML file at `path` (if present), then `MOVESYS_*`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
