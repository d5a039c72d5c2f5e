// ── Runtime engine configuration ──
//
// Describes *how* one engine instance talks to the service and paces its
// work. Carries credential data and tuning, but never touches disk --
// the binary resolves files/env through `essmaint-config` and hands a
// finished `EngineConfig` in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use essmaint_api::CommandSpec;

/// Configuration for one reconciliation engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Service API root (e.g. `http://host:8000/api`).
    pub base_url: Url,
    /// Account used for the per-cycle login.
    pub username: String,
    pub password: SecretString,
    /// Path to the serial inventory file, re-read every cycle.
    pub inventory_path: PathBuf,
    /// Time between cycle starts.
    pub cycle_period: Duration,
    /// Wait inserted between consecutive command dispatches.
    pub pacing_delay: Duration,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
    /// Page size for state queries (single page per state).
    pub page_size: u32,
    /// The maintenance command sent to each matched system.
    pub command: CommandSpec,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api"
                .parse()
                .expect("default base URL is valid"),
            username: String::new(),
            password: SecretString::from(String::new()),
            inventory_path: PathBuf::from("snlist.csv"),
            cycle_period: Duration::from_secs(4 * 60 * 60),
            pacing_delay: Duration::from_secs(2),
            request_timeout: Duration::from_secs(30),
            page_size: 1000,
            command: CommandSpec::default(),
        }
    }
}
