//! Fake bootstrap collaborator and application context

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::fake_engine::ScriptedEngine;
use super::test_data::ReadinessFacts;
use snapshot::{ApplicationConfig, ApplicationContext, Bootstrap, ServiceId, SnapshotService};

pub struct FakeApplication {
    facts: ReadinessFacts,
    engine: Arc<ScriptedEngine>,
}

impl FakeApplication {
    pub fn new(facts: ReadinessFacts, engine: Arc<ScriptedEngine>) -> Self {
        Self { facts, engine }
    }
}

impl ApplicationContext for FakeApplication {
    fn is_booted(&self) -> bool {
        self.facts.booted
    }

    fn is_bound(&self, service: ServiceId) -> bool {
        match service {
            ServiceId::Database => self.facts.database,
            ServiceId::Snapshot => self.facts.snapshot,
        }
    }

    fn snapshot_service(&self) -> Option<Arc<dyn SnapshotService>> {
        if self.facts.snapshot {
            Some(self.engine.clone() as Arc<dyn SnapshotService>)
        } else {
            None
        }
    }
}

/// Records every bootstrap request; fails when built with `failing`
pub struct FakeBootstrap {
    app: Option<Arc<FakeApplication>>,
    failure: Option<String>,
    calls: Mutex<Vec<ApplicationConfig>>,
}

impl FakeBootstrap {
    pub fn new(app: FakeApplication) -> Self {
        Self {
            app: Some(Arc::new(app)),
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            app: None,
            failure: Some(reason.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<ApplicationConfig> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Bootstrap for FakeBootstrap {
    async fn build_application(
        &self,
        config: ApplicationConfig,
    ) -> Result<Arc<dyn ApplicationContext>> {
        self.calls.lock().unwrap().push(config);
        match &self.app {
            Some(app) => Ok(app.clone() as Arc<dyn ApplicationContext>),
            None => Err(anyhow!(
                "{}",
                self.failure.as_deref().unwrap_or("bootstrap failed")
            )),
        }
    }
}
