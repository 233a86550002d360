//! Scripted snapshot engine

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use snapshot::progress::{ProgressEvent, ProgressSender};
use snapshot::{RestoreOptions, SnapshotService, VerifyOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Restore(RestoreOptions),
    Verify(VerifyOptions),
}

/// Emits a fixed list of events, then resolves or rejects
pub struct ScriptedEngine {
    events: Vec<ProgressEvent>,
    failure: Option<String>,
    calls: Mutex<Vec<EngineCall>>,
    started: Arc<Notify>,
    release: Option<Arc<Notify>>,
}

impl ScriptedEngine {
    pub fn succeeding(events: Vec<ProgressEvent>) -> Self {
        Self {
            events,
            failure: None,
            calls: Mutex::new(Vec::new()),
            started: Arc::new(Notify::new()),
            release: None,
        }
    }

    pub fn failing(events: Vec<ProgressEvent>, reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            ..Self::succeeding(events)
        }
    }

    /// Engine that signals `started()` and then waits for `release()` before emitting
    pub fn held(events: Vec<ProgressEvent>) -> Self {
        Self {
            release: Some(Arc::new(Notify::new())),
            ..Self::succeeding(events)
        }
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }

    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    pub fn release(&self) {
        if let Some(release) = &self.release {
            release.notify_one();
        }
    }

    async fn run(&self, call: EngineCall, progress: ProgressSender) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        self.started.notify_one();

        if let Some(release) = &self.release {
            release.notified().await;
        }

        for event in &self.events {
            progress.emit(event.clone());
            tokio::task::yield_now().await;
        }

        match &self.failure {
            Some(reason) => Err(anyhow!("{}", reason)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SnapshotService for ScriptedEngine {
    async fn restore(&self, options: &RestoreOptions, progress: ProgressSender) -> Result<()> {
        self.run(EngineCall::Restore(options.clone()), progress).await
    }

    async fn verify(&self, options: &VerifyOptions, progress: ProgressSender) -> Result<()> {
        self.run(EngineCall::Verify(options.clone()), progress).await
    }
}
