//! Seam to the external agent orchestrator
//!
//! The orchestrator owns the LLM conversation and decides which tools to
//! call; the copilot only forwards chat messages to it.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Chat request body, shared by `/chat` and the orchestrator wire format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Chat response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Something that can answer a free-text operations question
#[async_trait]
pub trait Orchestrator: Send + Sync {
    async fn respond(&self, message: &str) -> Result<String>;
}

/// Forwards chat messages to an orchestrator over HTTP
pub struct HttpOrchestrator {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl HttpOrchestrator {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        let endpoint = reqwest::Url::parse(endpoint).context("Invalid orchestrator URL")?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl Orchestrator for HttpOrchestrator {
    async fn respond(&self, message: &str) -> Result<String> {
        debug!(endpoint = %self.endpoint, "Forwarding chat message to orchestrator");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .await
            .context("Failed to reach orchestrator")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Orchestrator error ({}): {}", status, body);
        }

        let body: ChatResponse = response
            .json()
            .await
            .context("Failed to parse orchestrator response")?;

        Ok(body.response)
    }
}
