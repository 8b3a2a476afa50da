#[cfg(test)]
#[path = "http_client_test.rs"]
mod tests;

use std::time::Duration;

use async_trait::async_trait;

use crate::{AgentClient, AgentReply, AgentRequest, ClientError};

/// HTTP client for the orchestrator endpoint. One POST per request, no retry.
pub struct HttpAgentClient {
    url: String,
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl HttpAgentClient {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AgentClient for HttpAgentClient {
    async fn send(&self, request: &AgentRequest) -> Result<AgentReply, ClientError> {
        if self.url.is_empty() {
            return Err(ClientError::MissingUrl);
        }

        tracing::debug!(
            url = self.url(),
            agent = %request.agent,
            session_id = %request.session_id,
            field = request.prompt_field(),
            "sending request to orchestrator"
        );

        let mut builder = self
            .client
            .post(&self.url)
            .json(request);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }

        let body = response.text().await?;
        let reply: AgentReply = serde_json::from_str(&body)?;

        Ok(reply)
    }
}
