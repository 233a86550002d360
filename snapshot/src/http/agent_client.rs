// File: snapshot/src/http/agent_client.rs
use anyhow::{anyhow, Result};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AgentConfig;
use crate::progress::ProgressEvent;

/// Response to `POST /app/bootstrap`
#[derive(Debug, Clone, Deserialize)]
pub struct AppStatusResponse {
    pub success: bool,
    #[serde(default)]
    pub booted: bool,
    #[serde(default)]
    pub services: Vec<String>,
    pub error: Option<String>,
}

/// Response to `POST /snapshot/{restore,verify}`
#[derive(Debug, Clone, Deserialize)]
pub struct JobStartResponse {
    pub success: bool,
    pub job_id: Option<String>,
    pub error: Option<String>,
}

/// Response to `GET /operation/status/{job_id}`
#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusResponse {
    pub success: bool,
    pub job_status: Option<String>,
    pub progress: Option<ProgressEvent>,
    pub error: Option<String>,
}

/// Thin JSON client for one agent
#[derive(Debug, Clone)]
pub struct AgentClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl AgentClient {
    pub fn new(config: &AgentConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }

    pub async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("POST {}", url);
        let response = self
            .authorize(self.client.post(&url))
            .json(body)
            .send()
            .await
            .map_err(|e| anyhow!("HTTP request to {} failed: {}", url, e))?;
        Self::decode(&url, response).await
    }

    pub async fn get_json<T>(&self, endpoint: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("GET {}", url);
        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| anyhow!("HTTP request to {} failed: {}", url, e))?;
        Self::decode(&url, response).await
    }

    async fn decode<T: DeserializeOwned>(url: &str, response: reqwest::Response) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Agent request {} failed with status {}: {}",
                url,
                status,
                error_text
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| anyhow!("Failed to parse response from {}: {}", url, e))
    }
}
