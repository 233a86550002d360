//! Mock HTTP node agent for testing
//!
//! Answers the bootstrap, job start and job status endpoints without a real
//! agent running.

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use snapshot::config::AgentConfig;

pub struct MockAgentServer {
    pub server: MockServer,
    pub base_url: String,
}

impl MockAgentServer {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    /// Agent config pointing at this server with a fast poll interval
    pub fn agent_config(&self) -> AgentConfig {
        AgentConfig {
            host: self.server.address().ip().to_string(),
            port: self.server.address().port(),
            poll_interval_ms: 10,
            max_consecutive_failures: 3,
            request_timeout_seconds: 5,
            ..AgentConfig::default()
        }
    }

    pub async fn mock_bootstrap(&self, booted: bool, services: &[&str]) {
        Mock::given(method("POST"))
            .and(path("/app/bootstrap"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "booted": booted,
                "services": services,
                "error": null
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_bootstrap_refused(&self, error: &str) {
        Mock::given(method("POST"))
            .and(path("/app/bootstrap"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "error": error
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a job start on `/snapshot/restore` or `/snapshot/verify`
    pub async fn mock_job_started(&self, endpoint: &str, job_id: &str) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "job_id": job_id,
                "error": null
            })))
            .mount(&self.server)
            .await;
    }

    /// Report the job as running `times` times, then fall through to later mocks
    pub async fn mock_job_running(&self, job_id: &str, progress: Value, times: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/operation/status/{}", job_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "job_status": "Running",
                "progress": progress
            })))
            .up_to_n_times(times)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_job_completed(&self, job_id: &str, progress: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/operation/status/{}", job_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "job_status": "Completed",
                "progress": progress
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_job_failed(&self, job_id: &str, error: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/operation/status/{}", job_id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "job_status": "Failed",
                "error": error
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_status_unavailable(&self, job_id: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/operation/status/{}", job_id)))
            .respond_with(ResponseTemplate::new(503).set_body_string("agent restarting"))
            .mount(&self.server)
            .await;
    }
}

/// Progress payload in the agent's wire format
pub fn progress_json(entity: &str, phase: &str, processed: u64, total: Option<u64>) -> Value {
    json!({
        "entity": entity,
        "phase": phase,
        "processed": processed,
        "total": total
    })
}
