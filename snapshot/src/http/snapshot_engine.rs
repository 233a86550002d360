// File: snapshot/src/http/snapshot_engine.rs
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use super::agent_client::{AgentClient, JobStartResponse, JobStatusResponse};
use crate::config::AgentConfig;
use crate::engine::SnapshotService;
use crate::options::{RestoreOptions, VerifyOptions};
use crate::progress::{ProgressEvent, ProgressSender};

/// Snapshot engine running inside the node agent
pub struct AgentSnapshotService {
    client: AgentClient,
    poll_interval: Duration,
    max_consecutive_failures: u32,
}

impl AgentSnapshotService {
    pub fn new(client: AgentClient, config: &AgentConfig) -> Self {
        Self {
            client,
            poll_interval: config.poll_interval(),
            max_consecutive_failures: config.max_consecutive_failures.max(1),
        }
    }

    async fn run_job<B: Serialize + Sync>(
        &self,
        endpoint: &str,
        options: &B,
        progress: ProgressSender,
    ) -> Result<()> {
        let started: JobStartResponse = self.client.post_json(endpoint, options).await?;
        if !started.success {
            return Err(anyhow!(
                "Agent rejected {}: {}",
                endpoint,
                started.error.as_deref().unwrap_or("Unknown error")
            ));
        }

        let job_id = started
            .job_id
            .ok_or_else(|| anyhow!("Agent did not return a job_id for {}", endpoint))?;

        info!("Snapshot job {} started via {}", job_id, endpoint);
        self.poll_for_completion(&job_id, &progress).await
    }

    /// Poll until the job completes, forwarding each distinct progress value once
    async fn poll_for_completion(&self, job_id: &str, progress: &ProgressSender) -> Result<()> {
        let status_endpoint = format!("/operation/status/{}", job_id);
        let mut consecutive_failures = 0u32;
        let mut last_progress: Option<ProgressEvent> = None;

        loop {
            sleep(self.poll_interval).await;

            let status: JobStatusResponse = match self.client.get_json(&status_endpoint).await {
                Ok(status) => status,
                Err(e) => {
                    consecutive_failures += 1;
                    warn!(
                        "Polling job {} failed ({}/{}): {}",
                        job_id, consecutive_failures, self.max_consecutive_failures, e
                    );
                    if consecutive_failures >= self.max_consecutive_failures {
                        return Err(anyhow!(
                            "Lost track of job {} after {} failed polls: {}",
                            job_id,
                            consecutive_failures,
                            e
                        ));
                    }
                    continue;
                }
            };

            if !status.success {
                consecutive_failures += 1;
                let error_msg = status
                    .error
                    .as_deref()
                    .unwrap_or("Unknown error from agent");
                warn!("Agent returned error for job {}: {}", job_id, error_msg);
                if consecutive_failures >= self.max_consecutive_failures {
                    return Err(anyhow!("Job {} failed on agent: {}", job_id, error_msg));
                }
                continue;
            }
            consecutive_failures = 0;

            if let Some(event) = status.progress {
                if last_progress.as_ref() != Some(&event) {
                    progress.emit(event.clone());
                    last_progress = Some(event);
                }
            }

            match status.job_status.as_deref() {
                Some("Completed") => {
                    info!("Snapshot job {} completed", job_id);
                    return Ok(());
                }
                Some("Failed") => {
                    let error_msg = status
                        .error
                        .as_deref()
                        .unwrap_or("Job failed with unknown error");
                    return Err(anyhow!("Job {} failed: {}", job_id, error_msg));
                }
                Some("Running") => {}
                Some(other) => {
                    warn!(
                        "Unknown job status '{}' for job {}, treating as running",
                        other, job_id
                    );
                }
                None => {
                    warn!("No job_status field in response for job {}", job_id);
                }
            }
        }
    }
}

#[async_trait]
impl SnapshotService for AgentSnapshotService {
    async fn restore(&self, options: &RestoreOptions, progress: ProgressSender) -> Result<()> {
        self.run_job("/snapshot/restore", options, progress).await
    }

    async fn verify(&self, options: &VerifyOptions, progress: ProgressSender) -> Result<()> {
        self.run_job("/snapshot/verify", options, progress).await
    }
}
