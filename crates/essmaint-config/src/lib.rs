//! Configuration for the essmaint daemon.
//!
//! A TOML file plus `ESSMAINT_`-prefixed environment variables, merged
//! through figment and translated into `essmaint_core::EngineConfig`.
//! Environment always wins, so the password can stay out of the file
//! entirely (`ESSMAINT_PASSWORD`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use essmaint_core::{CommandSpec, EngineConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error(
        "no credentials configured -- set username/password in the config \
         file or via ESSMAINT_USERNAME / ESSMAINT_PASSWORD"
    )]
    NoCredentials,

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// On-disk configuration. Everything has a default except the service
/// endpoint and the credentials.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Service API root (e.g. "http://host:8000/api").
    pub base_url: Option<String>,

    /// Account used for the per-cycle login.
    pub username: Option<String>,

    /// Plaintext password -- prefer ESSMAINT_PASSWORD.
    pub password: Option<String>,

    /// Serial inventory file, one serial per line.
    #[serde(default = "default_inventory")]
    pub inventory: PathBuf,

    /// Time between cycle starts, in seconds.
    #[serde(default = "default_cycle_period")]
    pub cycle_period_secs: u64,

    /// Wait between consecutive command dispatches, in seconds.
    #[serde(default = "default_pacing_delay")]
    pub pacing_delay_secs: u64,

    /// Per-request HTTP timeout, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Page size for state queries.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Maintenance command parameters.
    #[serde(default)]
    pub command: CommandSpec,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            username: None,
            password: None,
            inventory: default_inventory(),
            cycle_period_secs: default_cycle_period(),
            pacing_delay_secs: default_pacing_delay(),
            timeout_secs: default_timeout(),
            page_size: default_page_size(),
            command: CommandSpec::default(),
        }
    }
}

fn default_inventory() -> PathBuf {
    PathBuf::from("snlist.csv")
}
fn default_cycle_period() -> u64 {
    4 * 60 * 60
}
fn default_pacing_delay() -> u64 {
    2
}
fn default_timeout() -> u64 {
    30
}
fn default_page_size() -> u32 {
    1000
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "essmaint", "essmaint").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("essmaint");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the configuration from file + environment.
///
/// `path` overrides the canonical config location. A missing file is
/// fine -- defaults and environment variables still apply.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("ESSMAINT_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Translation to the engine config ────────────────────────────────

/// Build an `EngineConfig`, validating the required fields.
pub fn to_engine_config(cfg: &Config) -> Result<EngineConfig, ConfigError> {
    let base_url = cfg
        .base_url
        .as_deref()
        .ok_or_else(|| ConfigError::Validation {
            field: "base_url".into(),
            reason: "not set".into(),
        })?;

    let base_url: url::Url = base_url.parse().map_err(|_| ConfigError::Validation {
        field: "base_url".into(),
        reason: format!("invalid URL: {base_url}"),
    })?;

    let username = cfg.username.clone().ok_or(ConfigError::NoCredentials)?;
    let password = cfg.password.clone().ok_or(ConfigError::NoCredentials)?;

    if cfg.cycle_period_secs == 0 {
        return Err(ConfigError::Validation {
            field: "cycle_period_secs".into(),
            reason: "must be positive".into(),
        });
    }
    if cfg.timeout_secs == 0 {
        return Err(ConfigError::Validation {
            field: "timeout_secs".into(),
            reason: "must be positive -- a hung request would stall the scheduler".into(),
        });
    }

    Ok(EngineConfig {
        base_url,
        username,
        password: SecretString::from(password),
        inventory_path: cfg.inventory.clone(),
        cycle_period: Duration::from_secs(cfg.cycle_period_secs),
        pacing_delay: Duration::from_secs(cfg.pacing_delay_secs),
        request_timeout: Duration::from_secs(cfg.timeout_secs),
        page_size: cfg.page_size,
        command: cfg.command.clone(),
    })
}
