// File: snapshot/src/config/manager.rs
use super::Config;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

use crate::errors::ConfigError;

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    pub async fn new(config_path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_configuration(config_path).await?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_configuration(config_path: &Path) -> Result<Config, ConfigError> {
        let content = match fs::read_to_string(config_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "No config file at {}, using built-in defaults",
                    config_path.display()
                );
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: config_path.display().to_string(),
                    reason: e.to_string(),
                })
            }
        };

        debug!("Loading snapshot config: {}", config_path.display());

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: config_path.display().to_string(),
            reason: e.to_string(),
        })?;

        info!(
            "Loaded config: agent {}, lock dir {}, default network {}",
            config.agent.base_url(),
            config.lock_dir.display(),
            config
                .default_network
                .map(|network| network.as_str())
                .unwrap_or("none")
        );

        Ok(config)
    }
}
