// File: snapshot/src/http/application.rs
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

use super::agent_client::{AgentClient, AppStatusResponse};
use super::snapshot_engine::AgentSnapshotService;
use crate::app::{ApplicationConfig, ApplicationContext, Bootstrap, ServiceId};
use crate::config::AgentConfig;
use crate::engine::SnapshotService;

/// Boots the node application through its agent
pub struct AgentBootstrap {
    client: AgentClient,
    config: AgentConfig,
}

impl AgentBootstrap {
    pub fn new(config: &AgentConfig) -> Result<Self> {
        Ok(Self {
            client: AgentClient::new(config)?,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl Bootstrap for AgentBootstrap {
    async fn build_application(
        &self,
        config: ApplicationConfig,
    ) -> Result<Arc<dyn ApplicationContext>> {
        info!(
            "Bootstrapping {} process for {} via agent {}",
            config.process_type,
            config.command,
            self.client.base_url()
        );

        let status: AppStatusResponse = self.client.post_json("/app/bootstrap", &config).await?;
        if !status.success {
            return Err(anyhow!(
                "Agent refused to bootstrap: {}",
                status.error.as_deref().unwrap_or("Unknown error")
            ));
        }

        let engine = Arc::new(AgentSnapshotService::new(self.client.clone(), &self.config));
        Ok(Arc::new(AgentApplication::from_status(&status, engine)))
    }
}

/// Application state as reported by the agent
pub struct AgentApplication {
    booted: bool,
    services: HashSet<String>,
    engine: Arc<AgentSnapshotService>,
}

impl AgentApplication {
    pub fn from_status(status: &AppStatusResponse, engine: Arc<AgentSnapshotService>) -> Self {
        Self {
            booted: status.booted,
            services: status.services.iter().cloned().collect(),
            engine,
        }
    }
}

impl ApplicationContext for AgentApplication {
    fn is_booted(&self) -> bool {
        self.booted
    }

    fn is_bound(&self, service: ServiceId) -> bool {
        self.services.contains(service.as_str())
    }

    fn snapshot_service(&self) -> Option<Arc<dyn SnapshotService>> {
        if self.is_bound(ServiceId::Snapshot) {
            Some(self.engine.clone() as Arc<dyn SnapshotService>)
        } else {
            None
        }
    }
}
