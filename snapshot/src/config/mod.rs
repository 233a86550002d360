// File: snapshot/src/config/mod.rs
pub mod manager;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
pub use manager::ConfigManager;

use crate::constants::{agent, defaults};
use crate::options::Network;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_lock_dir")]
    pub lock_dir: PathBuf,
    /// Network used when `--network` is absent; checked when the file is parsed
    pub default_network: Option<Network>,
    #[serde(default)]
    pub agent: AgentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_agent_host")]
    pub host: String,
    #[serde(default = "default_agent_port")]
    pub port: u16,
    pub api_key: Option<String>,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_max_consecutive_failures")]
    pub max_consecutive_failures: u32,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_lock_dir() -> PathBuf {
    PathBuf::from(defaults::LOCK_DIR)
}

fn default_agent_host() -> String {
    agent::DEFAULT_HOST.to_string()
}

fn default_agent_port() -> u16 {
    agent::DEFAULT_PORT
}

fn default_poll_interval_ms() -> u64 {
    agent::POLL_INTERVAL_MS
}

fn default_max_consecutive_failures() -> u32 {
    agent::MAX_CONSECUTIVE_FAILURES
}

fn default_request_timeout() -> u64 {
    agent::REQUEST_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lock_dir: default_lock_dir(),
            default_network: None,
            agent: AgentConfig::default(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            host: default_agent_host(),
            port: default_agent_port(),
            api_key: None,
            poll_interval_ms: default_poll_interval_ms(),
            max_consecutive_failures: default_max_consecutive_failures(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl AgentConfig {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Lock target for the storage of the node behind this agent
    pub fn storage_target(&self) -> String {
        let host: String = self
            .host
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
            .collect();
        format!("{}_{}", host, self.port)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}
