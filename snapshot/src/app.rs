//! Application bootstrap collaborators
//!
//! The command layer receives these as explicit values (see
//! [`crate::orchestrator::CommandContext`]) instead of resolving them from a
//! container, so tests substitute fakes directly.

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::constants::commands;
use crate::engine::SnapshotService;
use crate::options::CommandOptions;

/// Services whose registration the readiness gate checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    Database,
    Snapshot,
}

impl ServiceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::Database => "database",
            ServiceId::Snapshot => "snapshot",
        }
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the bootstrap collaborator receives
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationConfig {
    pub process_type: String,
    pub command: String,
    pub flags: CommandOptions,
}

impl ApplicationConfig {
    pub fn for_command(flags: CommandOptions) -> Self {
        Self {
            process_type: commands::PROCESS_TYPE.to_string(),
            command: flags.command().to_string(),
            flags,
        }
    }
}

/// A booted (or partially booted) application
pub trait ApplicationContext: Send + Sync {
    fn is_booted(&self) -> bool;

    fn is_bound(&self, service: ServiceId) -> bool;

    /// Typed accessor for the snapshot engine; `None` when it is not bound
    fn snapshot_service(&self) -> Option<Arc<dyn SnapshotService>>;
}

#[async_trait]
pub trait Bootstrap: Send + Sync {
    async fn build_application(
        &self,
        config: ApplicationConfig,
    ) -> Result<Arc<dyn ApplicationContext>>;
}
